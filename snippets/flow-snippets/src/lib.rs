//! Snippets de fluxo: iteradores preguiçosos no lugar de generators e uma
//! "promise" simulada com thread + canal.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use vitrine_sdk::{console_log, Console, SnippetDef, SnippetResult};

pub const SNIPPETS: &[SnippetDef] = &[
    SnippetDef { id: "generators", run: generators },
    SnippetDef { id: "promises", run: promises },
];

/// Atraso do timer simulado em `promises`.
const SIMULATED_LATENCY: Duration = Duration::from_millis(20);

struct Fibonacci {
    current: u64,
    next: u64,
}

impl Iterator for Fibonacci {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let value = self.current;
        let following = self.current.checked_add(self.next)?;
        self.current = self.next;
        self.next = following;
        Some(value)
    }
}

fn fibonacci() -> Fibonacci {
    Fibonacci { current: 0, next: 1 }
}

/// Iteradores só produzem valores quando alguém os consome.
pub fn generators(console: &mut dyn Console) -> SnippetResult {
    let first: Vec<u64> = fibonacci().take(8).collect();
    console_log!(console, "first fibonacci:", first);

    let mut ids = (1..).map(|n| format!("id-{n}"));
    console_log!(console, "next id:", ids.next());
    console_log!(console, "next id:", ids.next());

    let even_squares: Vec<u32> = (1..=10).filter(|n| n % 2 == 0).map(|n| n * n).collect();
    console_log!(console, "even squares:", even_squares);

    let finite = fibonacci().count();
    console_log!(console, "fibonacci terms before u64 overflow:", finite);
    Ok(())
}

/// Dispara o "request" numa thread que responde depois de um timer.
fn simulated_request(succeed: bool) -> mpsc::Receiver<Result<String, String>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        thread::sleep(SIMULATED_LATENCY);
        let outcome = if succeed {
            Ok(String::from("200 OK"))
        } else {
            Err(String::from("request timed out"))
        };
        // O receptor pode já ter desistido; nada a fazer nesse caso.
        let _ = tx.send(outcome);
    });
    rx
}

fn await_request(rx: mpsc::Receiver<Result<String, String>>) -> anyhow::Result<String> {
    rx.recv()
        .map_err(|_| anyhow::anyhow!("request dropped before settling"))?
        .map_err(anyhow::Error::msg)
}

/// Encadeamento de resultados: sucesso, falha tratada e `and_then`.
pub fn promises(console: &mut dyn Console) -> SnippetResult {
    console_log!(console, "state:", "pending");

    let body = await_request(simulated_request(true))?;
    console_log!(console, "resolved:", body);

    match await_request(simulated_request(false)) {
        Ok(body) => console_log!(console, "resolved:", body),
        Err(err) => console_log!(console, "caught:", err.to_string()),
    }

    let chained = await_request(simulated_request(true))
        .map(|body| body.len())
        .and_then(|len| {
            if len > 3 {
                Ok(len * 2)
            } else {
                Err(anyhow::anyhow!("body too short"))
            }
        })?;
    console_log!(console, "chained:", chained);
    Ok(())
}
