//! PDF report rendering.
//!
//! Produces the fixed single-page decision report: title, the two inputs,
//! the crisp speed and the three-line rule explanation. The page is emitted
//! as a self-contained PDF 1.4 document using the built-in Helvetica fonts
//! with WinAnsi encoding, so every string is sanitized to Latin-1 first —
//! unsupported characters are replaced rather than rejected.

use crate::types::WashDecision;

/// Fixed report title, first line of the page.
pub const REPORT_TITLE: &str = "Fuzzy Logic Washing Machine Report";

/// A4 media box (points).
const PAGE_WIDTH: f64 = 595.0;
const PAGE_HEIGHT: f64 = 842.0;

/// Replace every character outside Latin-1 with `?`.
///
/// The report fonts use WinAnsi encoding; anything that cannot be encoded
/// must be substituted before rendering, never dropped silently.
pub fn sanitize_latin1(text: &str) -> String {
    text.chars()
        .map(|c| if (c as u32) <= 0xFF { c } else { '?' })
        .collect()
}

/// One decision report, ready to render.
#[derive(Debug, Clone)]
pub struct WashReport {
    pub weight: f64,
    pub dirt: f64,
    pub decision: WashDecision,
}

impl WashReport {
    pub fn new(weight: f64, dirt: f64, decision: WashDecision) -> Self {
        Self {
            weight,
            dirt,
            decision,
        }
    }

    /// The report body as plain text lines, before sanitization.
    ///
    /// Layout order is part of the output contract: title, weight, dirt,
    /// speed, then the rule explanation block.
    pub fn body_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Load Weight: {:.1} kg", self.weight),
            format!("Dirt Level: {:.1}", self.dirt),
            format!("Final Wash Speed: {:.2} RPM", self.decision.speed_rpm),
            String::new(),
            "Rule Explanation:".to_string(),
        ];
        lines.extend(self.decision.explanation.lines().map(str::to_string));
        lines
    }

    /// Render the report as a single-page PDF.
    pub fn render_pdf(&self) -> Vec<u8> {
        let mut content = String::new();
        content.push_str("BT\n/F1 14 Tf\n50 780 Td\n");
        content.push_str(&format!("({}) Tj\n", escape_pdf_string(&sanitize_latin1(REPORT_TITLE))));
        content.push_str("/F2 12 Tf\n0 -30 Td\n");
        for line in self.body_lines() {
            content.push_str(&format!(
                "({}) Tj\n0 -18 Td\n",
                escape_pdf_string(&sanitize_latin1(&line))
            ));
        }
        content.push_str("ET\n");

        build_pdf(&content)
    }
}

/// Escape backslashes and parentheses for a PDF literal string.
fn escape_pdf_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '(' => escaped.push_str("\\("),
            ')' => escaped.push_str("\\)"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Encode a sanitized string as Latin-1 bytes.
///
/// Callers must sanitize first; anything above 0xFF would be truncated here.
fn latin1_bytes(text: &str) -> Vec<u8> {
    text.chars().map(|c| (c as u32).min(0xFF) as u8).collect()
}

/// Assemble a minimal one-page PDF document around a content stream.
///
/// Object layout is fixed: catalog, page tree, page, bold + regular
/// Helvetica, content stream. Offsets in the xref table are byte-exact, so
/// everything is appended through one buffer.
fn build_pdf(content: &str) -> Vec<u8> {
    let content_bytes = latin1_bytes(content);

    let objects: Vec<Vec<u8>> = vec![
        b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
        b"<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_vec(),
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
             /Resources << /Font << /F1 4 0 R /F2 5 0 R >> >> /Contents 6 0 R >>"
        )
        .into_bytes(),
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
            .to_vec(),
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_vec(),
        {
            let mut stream = format!("<< /Length {} >>\nstream\n", content_bytes.len()).into_bytes();
            stream.extend_from_slice(&content_bytes);
            stream.extend_from_slice(b"\nendstream");
            stream
        },
    ];

    let mut out: Vec<u8> = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());

    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );

    out
}
