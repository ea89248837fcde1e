//! Harness de captura: executa um snippet contra um buffer privado e devolve
//! o texto produzido. Falhas do snippet (erro ou panic) viram a linha
//! `Error: <mensagem>` e nunca escapam daqui.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use vitrine_sdk::{LineBuffer, Snippet};

/// Prefixo da linha que registra a falha de um snippet.
pub const ERROR_PREFIX: &str = "Error: ";

/// Saída capturada de uma execução.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    lines: Vec<String>,
    failed: bool,
}

impl Transcript {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// `true` quando a última linha é a linha de erro acrescentada pelo harness.
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Linhas unidas por `\n`; buffer vazio dá string vazia.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Executa o snippet uma única vez e devolve apenas o texto.
pub fn run<S: Snippet + ?Sized>(snippet: &S) -> String {
    execute(snippet).text()
}

/// Executa o snippet uma única vez com um buffer novo.
pub fn execute<S: Snippet + ?Sized>(snippet: &S) -> Transcript {
    let mut buffer = LineBuffer::new();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| snippet.run(&mut buffer)));

    let failure = match outcome {
        Ok(Ok(())) => None,
        Ok(Err(err)) => Some(err.to_string()),
        Err(payload) => Some(panic_message(payload.as_ref())),
    };

    let failed = failure.is_some();
    if let Some(message) = failure {
        tracing::warn!(%message, lines = buffer.len(), "snippet falhou");
        buffer.push_line(format!("{ERROR_PREFIX}{message}"));
    } else {
        tracing::debug!(lines = buffer.len(), "snippet executado");
    }

    Transcript {
        lines: buffer.into_lines(),
        failed,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        String::from("snippet panicked")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_sdk::{console_log, Console, LineBuffer, SnippetResult, Value};

    fn logs_n(n: usize) -> impl Fn(&mut dyn Console) -> SnippetResult {
        move |console: &mut dyn Console| {
            for i in 0..n {
                console_log!(console, "line", i);
            }
            Ok(())
        }
    }

    #[test]
    fn test_n_logs_give_n_lines_in_order() {
        for n in [1, 2, 5, 17] {
            let text = run(&logs_n(n));
            let lines: Vec<&str> = text.split('\n').collect();
            assert_eq!(lines.len(), n);
            for (i, line) in lines.iter().enumerate() {
                assert_eq!(*line, format!("line {i}"));
            }
        }
    }

    #[test]
    fn test_empty_buffer_is_empty_string() {
        let transcript = execute(&logs_n(0));
        assert_eq!(transcript.text(), "");
        assert!(!transcript.failed());
    }

    #[test]
    fn test_error_partway_keeps_earlier_lines() {
        let snippet = |console: &mut dyn Console| -> SnippetResult {
            console_log!(console, "before");
            anyhow::bail!("boom");
        };
        let transcript = execute(&snippet);
        assert!(transcript.failed());
        assert_eq!(transcript.text(), "before\nError: boom");
    }

    #[test]
    fn test_nothing_runs_after_failure() {
        let snippet = |console: &mut dyn Console| -> SnippetResult {
            console_log!(console, "one");
            let n: i32 = "nope".parse()?;
            console_log!(console, "two", n);
            Ok(())
        };
        assert_eq!(
            run(&snippet),
            "one\nError: invalid digit found in string"
        );
    }

    #[test]
    fn test_panic_is_captured_as_error_line() {
        let snippet = |console: &mut dyn Console| -> SnippetResult {
            console_log!(console, "start");
            let items: Vec<i32> = Vec::new();
            if items.is_empty() {
                panic!("index out of range");
            }
            console_log!(console, "unreachable");
            Ok(())
        };
        let transcript = execute(&snippet);
        assert!(transcript.failed());
        assert_eq!(transcript.lines(), ["start", "Error: index out of range"]);
    }

    #[test]
    fn test_formatted_panic_message() {
        let snippet = |_: &mut dyn Console| -> SnippetResult {
            let limit = 3;
            panic!("limit {limit} exceeded");
        };
        assert_eq!(run(&snippet), "Error: limit 3 exceeded");
    }

    #[test]
    fn test_non_string_panic_payload() {
        let snippet = |console: &mut dyn Console| -> SnippetResult {
            console_log!(console, "before payload");
            std::panic::panic_any(42u8);
        };
        let transcript = execute(&snippet);
        assert!(transcript.failed());
        assert_eq!(
            transcript.lines(),
            ["before payload", "Error: snippet panicked"]
        );
    }

    #[test]
    fn test_run_is_idempotent() {
        let snippet = |console: &mut dyn Console| -> SnippetResult {
            console_log!(console, "score:", 20);
            Ok(())
        };
        assert_eq!(run(&snippet), "score: 20");
        assert_eq!(run(&snippet), "score: 20");
    }

    #[test]
    fn test_composite_is_rendered_structurally() {
        let snippet = |console: &mut dyn Console| -> SnippetResult {
            console_log!(console, Value::object([("a", 1)]));
            Ok(())
        };
        let text = run(&snippet);
        assert_eq!(text, r#"{"a":1}"#);
        assert!(!text.contains("[object Object]"));
    }

    #[test]
    fn test_outside_console_is_untouched() {
        let mut outside = LineBuffer::new();
        let snippet = |console: &mut dyn Console| -> SnippetResult {
            console_log!(console, "captured");
            anyhow::bail!("fail")
        };
        let _ = run(&snippet);
        {
            let console: &mut dyn Console = &mut outside;
            console_log!(console, "direct");
        }
        assert_eq!(outside.lines(), ["direct"]);
        // Uma nova execução não herda nada da anterior.
        assert_eq!(run(&logs_n(1)), "line 0");
    }

    #[test]
    fn test_concurrent_runs_are_independent() {
        let results: Vec<String> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|t| {
                    scope.spawn(move || {
                        let snippet = move |console: &mut dyn Console| -> SnippetResult {
                            for i in 0..50 {
                                console_log!(console, t, i);
                            }
                            Ok(())
                        };
                        run(&snippet)
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for (t, text) in results.iter().enumerate() {
            let lines: Vec<&str> = text.lines().collect();
            assert_eq!(lines.len(), 50);
            assert!(lines.iter().all(|l| l.starts_with(&format!("{t} "))));
        }
    }
}
