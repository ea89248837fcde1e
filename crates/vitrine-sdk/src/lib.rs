//! API que os snippets da Vitrine usam para falar com o runtime.
//!
//! Um snippet nunca escreve em stdout diretamente: ele recebe um
//! `&mut dyn Console` e cada chamada a `log` vira exatamente uma linha
//! no buffer de captura daquela execução.

mod value;

pub use value::Value;

/// Resultado de um snippet. Uma falha vira a linha `Error: <mensagem>` no host.
pub type SnippetResult = anyhow::Result<()>;

/// Capacidade de "emitir linha" entregue ao snippet pelo host.
pub trait Console {
    /// Registra uma chamada de log com os argumentos já convertidos em `Value`.
    fn log(&mut self, args: Vec<Value>);
}

/// Junta os argumentos de uma chamada de log em uma única linha.
///
/// Cada argumento é renderizado segundo o seu tipo (ver [`Value`]) e os
/// argumentos são separados por um único espaço.
pub fn render_line(args: &[Value]) -> String {
    args.iter()
        .map(Value::render)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Buffer de linhas em memória; uma linha por chamada a `log`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acrescenta uma linha já pronta (usado pelo host para a linha de erro).
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl Console for LineBuffer {
    fn log(&mut self, args: Vec<Value>) {
        self.lines.push(render_line(&args));
    }
}

/// Unidade de demonstração executada pelo host.
///
/// Qualquer closure `Fn(&mut dyn Console) -> SnippetResult` já é um snippet.
pub trait Snippet: Send + Sync {
    fn run(&self, console: &mut dyn Console) -> SnippetResult;
}

impl<F> Snippet for F
where
    F: Fn(&mut dyn Console) -> SnippetResult + Send + Sync,
{
    fn run(&self, console: &mut dyn Console) -> SnippetResult {
        self(console)
    }
}

/// Entrada estática exportada por um pacote de snippets.
#[derive(Clone, Copy)]
pub struct SnippetDef {
    pub id: &'static str,
    pub run: fn(&mut dyn Console) -> SnippetResult,
}

impl std::fmt::Debug for SnippetDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnippetDef").field("id", &self.id).finish()
    }
}

/// Equivalente ao `console.log(a, b, ...)`.
///
/// ```
/// use vitrine_sdk::{console_log, Console, LineBuffer};
///
/// let mut buf = LineBuffer::new();
/// let console: &mut dyn Console = &mut buf;
/// console_log!(console, "score:", 20);
/// assert_eq!(buf.lines(), ["score: 20"]);
/// ```
#[macro_export]
macro_rules! console_log {
    ($console:expr $(, $arg:expr)* $(,)?) => {
        $crate::Console::log(&mut *$console, ::std::vec![$($crate::Value::from($arg)),*])
    };
}
