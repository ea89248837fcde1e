//! Dispatcher: resolve um id no registro, executa pelo harness e entrega o
//! resultado ao sink.

use crate::harness;
use crate::registry::Registry;
use crate::sink::{DisplayResult, DisplaySink};

/// Id do slot de saída de um snippet.
pub fn output_target(id: &str) -> String {
    format!("out-{id}")
}

pub struct Dispatcher<'r, S: DisplaySink> {
    registry: &'r Registry,
    sink: S,
}

impl<'r, S: DisplaySink> Dispatcher<'r, S> {
    pub fn new(registry: &'r Registry, sink: S) -> Self {
        Self { registry, sink }
    }

    /// Executa `id` e envia o resultado ao sink.
    ///
    /// Id desconhecido não é erro: nada é enviado e o retorno é `Ok(false)`.
    /// Erros só vêm do próprio sink.
    pub fn dispatch(&mut self, id: &str) -> anyhow::Result<bool> {
        let Some(snippet) = self.registry.get(id) else {
            tracing::debug!(%id, "dispatch ignorado: id não registrado");
            return Ok(false);
        };

        let span = tracing::debug_span!("dispatch", %id);
        let transcript = span.in_scope(|| harness::execute(snippet));

        let result = DisplayResult {
            target: output_target(id),
            text: transcript.text(),
            is_failure: transcript.failed(),
        };
        self.sink.show(&result)?;
        Ok(true)
    }

    /// Despacha cada id em ordem; devolve quantos estavam registrados.
    pub fn dispatch_all<'a, I>(&mut self, ids: I) -> anyhow::Result<usize>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut ran = 0;
        for id in ids {
            if self.dispatch(id)? {
                ran += 1;
            }
        }
        Ok(ran)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
