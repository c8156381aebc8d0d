//! PDF report generator via HTML-to-PDF conversion
//!
//! Generates PDF reports by first creating an HTML report and then converting
//! it to PDF using headless Chrome/Chromium or another specified converter.

use super::html::HtmlReporter;
use crate::core::report::{ReportContext, ReportError, ReportGenerator};
use std::path::Path;
use std::process::{Command, Stdio};

/// PDF report generator using HTML-to-PDF conversion
pub struct PdfReporter {
    /// Optional custom PDF converter command
    converter: Option<String>,
}

impl PdfReporter {
    /// Create a new PDF reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { converter: None }
    }

    /// Create a PDF reporter with a custom converter
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn with_converter(converter: &str) -> Self {
        Self {
            converter: Some(converter.to_owned()),
        }
    }

    /// Detect available Chrome/Chromium browser
    fn detect_chrome() -> Option<String> {
        let candidates = [
            "google-chrome",
            "chrome",
            "chromium",
            "chromium-browser",
            "google-chrome-stable",
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome", // macOS
            "C:\\Program Files\\Google\\Chrome\\Application\\chrome.exe",   // Windows
            "C:\\Program Files (x86)\\Google\\Chrome\\Application\\chrome.exe",
        ];

        candidates.into_iter().find_map(|candidate| {
            Command::new(candidate)
                .arg("--version")
                .output()
                .ok()
                .filter(|output| output.status.success())
                .map(|_| candidate.to_owned())
        })
    }

    /// Print an HTML file to PDF with headless Chrome/Chromium
    fn html_to_pdf_chrome(
        chrome_cmd: &str,
        html_path: &Path,
        pdf_path: &Path,
    ) -> Result<(), ReportError> {
        logger::debug!("Converting {} with {chrome_cmd}", html_path.display());

        let status = Command::new(chrome_cmd)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--run-all-compositor-stages-before-draw")
            .arg("--no-pdf-header-footer")
            .arg(format!("--print-to-pdf={}", pdf_path.display()))
            .arg(format!("file://{}", html_path.canonicalize()?.display()))
            // Chrome is noisy on stderr (DBus, GPU); keep the console clean
            .stderr(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .map_err(|e| ReportError::Pdf(format!("cannot run '{chrome_cmd}': {e}")))?;

        if !status.success() {
            return Err(ReportError::Pdf(format!(
                "'{chrome_cmd}' exited with {status}"
            )));
        }

        Ok(())
    }

    /// Convert HTML report to PDF
    fn convert_html_to_pdf(&self, html_path: &Path, pdf_path: &Path) -> Result<(), ReportError> {
        if let Some(converter) = &self.converter {
            return Self::html_to_pdf_chrome(converter, html_path, pdf_path);
        }

        if let Some(chrome) = Self::detect_chrome() {
            return Self::html_to_pdf_chrome(&chrome, html_path, pdf_path);
        }

        Err(ReportError::Pdf(
            "Chrome/Chromium not found.\n\
            \n\
            To generate PDF reports, install Chrome or Chromium:\n\
            \n\
            • Ubuntu/Debian:  sudo apt install chromium-browser\n\
            • Fedora/RHEL:    sudo dnf install chromium\n\
            • macOS:          brew install --cask google-chrome\n\
            • Windows:        Download from https://www.google.com/chrome/\n\
            \n\
            Alternatively, specify a custom PDF converter:\n\
              --pdf-converter /path/to/chrome\n"
                .to_string(),
        ))
    }
}

impl Default for PdfReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for PdfReporter {
    /// Generate the HTML report to a temporary file, then print it to PDF
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), ReportError> {
        let html_path = std::env::temp_dir().join(format!(
            "unihub_{}_{}.html",
            ctx.file_stem(),
            std::process::id()
        ));

        HtmlReporter::new().generate(ctx, &html_path)?;
        let result = self.convert_html_to_pdf(&html_path, output_path);
        let _ = std::fs::remove_file(&html_path);
        result
    }

    /// PDF is binary; this returns a note rather than the document
    fn render(&self, _ctx: &ReportContext) -> Result<String, ReportError> {
        Ok(String::from(
            "PDF reports are generated via HTML-to-PDF conversion.",
        ))
    }
}
