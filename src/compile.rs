//! External compiler invocation: typeset markup into a PDF.
//!
//! The only pipeline stage that talks to a non-deterministic external
//! dependency, and therefore the only one with a timeout. The compiler runs
//! in a throwaway directory; only the finished PDF is copied out.

use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::error::PlotError;

const JOB_NAME: &str = "network";
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub struct CompileOptions {
    pub program: String,
    pub timeout: Duration,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            program: "pdflatex".to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Compile markup to a PDF at `output`. Non-zero exit and timeout both
/// surface as `CompilationFailed` with the captured compiler log.
pub fn compile(markup: &str, output: &Path, options: &CompileOptions) -> Result<(), PlotError> {
    let workdir = tempfile::tempdir()?;
    let tex_path = workdir.path().join(format!("{}.tex", JOB_NAME));
    fs::write(&tex_path, markup)?;

    // Capture stdout into a file; pdflatex output easily overflows a pipe.
    let log_path = workdir.path().join("stdout.log");
    let log_file = fs::File::create(&log_path)?;

    let mut child = Command::new(&options.program)
        .arg("-interaction=nonstopmode")
        .arg("-halt-on-error")
        .arg(format!("{}.tex", JOB_NAME))
        .current_dir(workdir.path())
        .stdin(Stdio::null())
        .stdout(Stdio::from(log_file))
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| PlotError::CompilationFailed {
            program: options.program.clone(),
            status: "could not start".to_string(),
            log: e.to_string(),
        })?;

    let deadline = Instant::now() + options.timeout;
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(PlotError::CompilationFailed {
                program: options.program.clone(),
                status: format!("timed out after {:?}", options.timeout),
                log: read_log(&log_path),
            });
        }
        std::thread::sleep(POLL_INTERVAL);
    };

    if !status.success() {
        return Err(PlotError::CompilationFailed {
            program: options.program.clone(),
            status: format!("exited with {}", status),
            log: read_log(&log_path),
        });
    }

    fs::copy(workdir.path().join(format!("{}.pdf", JOB_NAME)), output)?;
    Ok(())
}

fn read_log(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_compiler_is_compilation_failure() {
        let dir = tempfile::tempdir().unwrap();
        let options = CompileOptions {
            program: "definitely-not-a-latex-compiler".to_string(),
            timeout: Duration::from_secs(1),
        };
        let err = compile("\\documentclass{standalone}", &dir.path().join("out.pdf"), &options)
            .unwrap_err();
        match err {
            PlotError::CompilationFailed { program, .. } => {
                assert_eq!(program, "definitely-not-a-latex-compiler");
            }
            other => panic!("expected CompilationFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_failing_compiler_captures_exit() {
        // `false` exits non-zero immediately and exists everywhere we test.
        let dir = tempfile::tempdir().unwrap();
        let options = CompileOptions {
            program: "false".to_string(),
            timeout: Duration::from_secs(5),
        };
        let err = compile("x", &dir.path().join("out.pdf"), &options).unwrap_err();
        assert!(matches!(err, PlotError::CompilationFailed { .. }));
    }
}
