//! PDF export through an external LaTeX toolchain.
//!
//! `PdfRenderer` is the seam: production uses `LatexRenderer`, tests and
//! hosts without a TeX install use something that fails cleanly. A render
//! failure only ever disables PDF; the Word path does not depend on it.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, error, info};

const JOB_NAME: &str = "resume";
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);
/// Lines of compiler output kept in the error message.
const LOG_EXCERPT_LINES: usize = 5;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("LaTeX program '{0}' is not installed")]
    ProgramMissing(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("LaTeX compilation failed: {0}")]
    Compile(String),

    #[error("LaTeX compilation timed out after {0:?}")]
    Timeout(Duration),
}

#[async_trait]
pub trait PdfRenderer: Send + Sync {
    /// Compiles a complete LaTeX document to PDF bytes.
    async fn render(&self, latex: &str) -> Result<Vec<u8>, RenderError>;

    /// Whether the toolchain can be invoked at all.
    async fn is_available(&self) -> bool;
}

/// Runs `pdflatex` (or a compatible program) in a throwaway directory.
pub struct LatexRenderer {
    program: String,
    timeout: Duration,
}

impl LatexRenderer {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    fn spawn_error(&self, e: std::io::Error) -> RenderError {
        if e.kind() == std::io::ErrorKind::NotFound {
            RenderError::ProgramMissing(self.program.clone())
        } else {
            RenderError::Io(e)
        }
    }

    async fn compile(&self, workdir: &Path) -> Result<(), RenderError> {
        let tex_file = format!("{JOB_NAME}.tex");
        let compile = Command::new(&self.program)
            .args(["-interaction=nonstopmode", "-halt-on-error", "-output-directory"])
            .arg(workdir)
            .arg(&tex_file)
            .current_dir(workdir)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = tokio::select! {
            result = compile => result.map_err(|e| self.spawn_error(e))?,
            _ = tokio::time::sleep(self.timeout) => {
                return Err(RenderError::Timeout(self.timeout));
            }
        };

        if !output.status.success() {
            let log = String::from_utf8_lossy(&output.stdout);
            let excerpt = log_excerpt(&log);
            error!("{} exited with {}: {}", self.program, output.status, excerpt);
            return Err(RenderError::Compile(excerpt));
        }
        Ok(())
    }
}

#[async_trait]
impl PdfRenderer for LatexRenderer {
    async fn render(&self, latex: &str) -> Result<Vec<u8>, RenderError> {
        let workdir = tempfile::tempdir()?;
        tokio::fs::write(workdir.path().join(format!("{JOB_NAME}.tex")), latex).await?;

        self.compile(workdir.path()).await?;

        let pdf_path = workdir.path().join(format!("{JOB_NAME}.pdf"));
        let bytes = match tokio::fs::read(&pdf_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RenderError::Compile(format!(
                    "{} finished without producing {}",
                    self.program,
                    pdf_path.display()
                )));
            }
            Err(e) => return Err(RenderError::Io(e)),
        };

        debug!("Rendered PDF: {} bytes", bytes.len());
        Ok(bytes)
    }

    async fn is_available(&self) -> bool {
        let probe = Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status();

        let available = matches!(
            tokio::time::timeout(PROBE_TIMEOUT, probe).await,
            Ok(Ok(status)) if status.success()
        );
        info!(
            "LaTeX program '{}' {}",
            self.program,
            if available { "found" } else { "not available; PDF export disabled" }
        );
        available
    }
}

/// TeX reports errors on lines starting with `!`; fall back to the tail of
/// the log when there are none.
fn log_excerpt(log: &str) -> String {
    let errors: Vec<&str> = log
        .lines()
        .filter(|l| l.starts_with('!'))
        .take(LOG_EXCERPT_LINES)
        .collect();
    if !errors.is_empty() {
        return errors.join(" ");
    }
    let lines: Vec<&str> = log.lines().filter(|l| !l.trim().is_empty()).collect();
    lines[lines.len().saturating_sub(LOG_EXCERPT_LINES)..].join(" ")
}
