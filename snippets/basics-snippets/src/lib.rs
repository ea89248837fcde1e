//! Snippets básicos: variáveis, escopo, desestruturação e propagação de erros.

use vitrine_sdk::{console_log, Console, SnippetDef, SnippetResult};

pub const SNIPPETS: &[SnippetDef] = &[
    SnippetDef { id: "letconst", run: letconst },
    SnippetDef { id: "scope", run: scope },
    SnippetDef { id: "destructuring", run: destructuring },
    SnippetDef { id: "errors", run: errors },
];

const MAX: i32 = 100;

/// `let mut` pode ser reatribuído; `const` é fixo em tempo de compilação.
pub fn letconst(console: &mut dyn Console) -> SnippetResult {
    let mut score = 10;
    score += 10;
    console_log!(console, "score after reassign:", score);
    console_log!(console, "MAX:", MAX);
    Ok(())
}

/// Blocos criam escopo; shadowing cria uma nova ligação sem tocar a externa.
pub fn scope(console: &mut dyn Console) -> SnippetResult {
    let level = "outer";
    {
        let level = "inner";
        console_log!(console, "inside block:", level);
    }
    console_log!(console, "outside block:", level);

    let count = "3";
    let count: i32 = count.parse()?;
    console_log!(console, "shadowed count:", count * 2);

    let total = (1..=3).fold(0, |acc, n| acc + n);
    console_log!(console, "closure captured sum:", total);
    Ok(())
}

struct User {
    name: &'static str,
    age: u32,
    roles: Vec<&'static str>,
}

/// Padrões em tuplas, slices e structs.
pub fn destructuring(console: &mut dyn Console) -> SnippetResult {
    let (a, b) = (1, 2);
    let (a, b) = (b, a);
    console_log!(console, "swapped:", a, b);

    let colors = ["red", "green", "blue", "alpha"];
    if let [first, second, rest @ ..] = colors.as_slice() {
        console_log!(console, "first:", *first, "second:", *second, "rest:", rest.to_vec());
    }

    let user = User {
        name: "Ada",
        age: 36,
        roles: vec!["admin", "dev"],
    };
    let User { name, age: years, .. } = &user;
    console_log!(console, "name:", *name, "years:", *years);

    let nickname: Option<&str> = None;
    let shown = nickname.unwrap_or("anonymous");
    console_log!(console, "nickname default:", shown, "roles:", user.roles.len());
    Ok(())
}

/// O operador `?` interrompe o snippet no primeiro erro.
pub fn errors(console: &mut dyn Console) -> SnippetResult {
    let ok: i32 = "42".parse()?;
    console_log!(console, "parsed \"42\" ->", ok);

    let fallback = "x1".parse::<i32>().unwrap_or(-1);
    console_log!(console, "parse with fallback:", fallback);

    let bad: i32 = "abc".parse()?;
    console_log!(console, "never reached:", bad);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_sdk::LineBuffer;

    #[test]
    fn test_letconst_output() {
        let mut buf = LineBuffer::new();
        letconst(&mut buf).unwrap();
        assert_eq!(buf.lines(), ["score after reassign: 20", "MAX: 100"]);
    }

    #[test]
    fn test_destructuring_output() {
        let mut buf = LineBuffer::new();
        destructuring(&mut buf).unwrap();
        assert_eq!(buf.lines()[0], "swapped: 2 1");
        assert_eq!(
            buf.lines()[1],
            r#"first: red second: green rest: ["blue","alpha"]"#
        );
        assert_eq!(buf.lines()[2], "name: Ada years: 36");
    }

    #[test]
    fn test_errors_stops_at_bad_parse() {
        let mut buf = LineBuffer::new();
        let err = errors(&mut buf).unwrap_err();
        assert_eq!(err.to_string(), "invalid digit found in string");
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<_> = SNIPPETS.iter().map(|s| s.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), SNIPPETS.len());
    }
}
