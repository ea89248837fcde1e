//! Snippets de tipos: structs com traits, coleções da std e reflexão via `Any`.

use serde::Serialize;
use std::any::{type_name, Any};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::fmt;
use vitrine_sdk::{console_log, Console, SnippetDef, SnippetResult, Value};

pub const SNIPPETS: &[SnippetDef] = &[
    SnippetDef { id: "classes", run: classes },
    SnippetDef { id: "collections", run: collections },
    SnippetDef { id: "reflection", run: reflection },
];

trait Animal {
    fn name(&self) -> &str;

    fn sound(&self) -> String {
        String::from("...")
    }

    fn speak(&self) -> String {
        format!("{} says {}", self.name(), self.sound())
    }
}

#[derive(Debug, Serialize)]
struct Dog {
    name: String,
    legs: u8,
}

impl Animal for Dog {
    fn name(&self) -> &str {
        &self.name
    }

    fn sound(&self) -> String {
        String::from("woof")
    }
}

#[derive(Debug, Serialize)]
struct Fish {
    name: String,
}

impl Animal for Fish {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Dog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dog({}, {} legs)", self.name, self.legs)
    }
}

/// Traits com métodos default fazem o papel de herança.
pub fn classes(console: &mut dyn Console) -> SnippetResult {
    let rex = Dog {
        name: String::from("Rex"),
        legs: 4,
    };
    let nemo = Fish {
        name: String::from("Nemo"),
    };

    console_log!(console, rex.speak());
    console_log!(console, nemo.speak());
    console_log!(console, "display:", rex.to_string());
    console_log!(console, "as data:", Value::from_serialize(&rex)?);

    let zoo: Vec<Box<dyn Animal>> = vec![Box::new(rex), Box::new(nemo)];
    let names: Vec<&str> = zoo.iter().map(|a| a.name()).collect();
    console_log!(console, "zoo:", names);
    Ok(())
}

/// Vec, VecDeque, HashMap, BTreeMap e BTreeSet.
pub fn collections(console: &mut dyn Console) -> SnippetResult {
    let mut stack = vec![1, 2, 3];
    stack.push(4);
    let top = stack.pop();
    console_log!(console, "vec:", stack.clone(), "popped:", top);

    let mut queue: VecDeque<&str> = VecDeque::new();
    queue.push_back("b");
    queue.push_front("a");
    console_log!(console, "deque:", queue.iter().copied().collect::<Vec<_>>());

    let mut stock: HashMap<&str, i32> = HashMap::new();
    *stock.entry("apple").or_insert(0) += 3;
    *stock.entry("pear").or_insert(0) += 1;
    *stock.entry("apple").or_insert(0) += 2;
    console_log!(console, "stock:", stock);

    let mut ranking = BTreeMap::new();
    ranking.insert("carol", 7);
    ranking.insert("alice", 9);
    console_log!(console, "ranking:", ranking);

    let unique: BTreeSet<i32> = [3, 1, 3, 2, 1].into_iter().collect();
    console_log!(console, "set:", unique.into_iter().collect::<Vec<_>>());
    Ok(())
}

fn describe(value: &dyn Any) -> String {
    if let Some(n) = value.downcast_ref::<i32>() {
        format!("i32 with value {n}")
    } else if let Some(s) = value.downcast_ref::<String>() {
        format!("String of length {}", s.len())
    } else {
        String::from("unknown type")
    }
}

fn short_type_name<T: ?Sized>(_: &T) -> &'static str {
    let full = type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

/// Inspeção de tipos em tempo de execução com `Any` e `type_name`.
pub fn reflection(console: &mut dyn Console) -> SnippetResult {
    let number = 7i32;
    let text = String::from("hello");
    let flag = true;

    console_log!(console, "type of number:", short_type_name(&number));
    console_log!(console, "type of flag:", short_type_name(&flag));
    console_log!(console, describe(&number));
    console_log!(console, describe(&text));
    console_log!(console, describe(&flag));
    console_log!(
        console,
        "size of u64:",
        std::mem::size_of::<u64>(),
        "size of Option<Box<u8>>:",
        std::mem::size_of::<Option<Box<u8>>>()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_sdk::LineBuffer;

    #[test]
    fn test_classes_output() {
        let mut buf = LineBuffer::new();
        classes(&mut buf).unwrap();
        assert_eq!(
            buf.lines(),
            [
                "Rex says woof",
                "Nemo says ...",
                "display: Dog(Rex, 4 legs)",
                r#"as data: {"name":"Rex","legs":4}"#,
                r#"zoo: ["Rex","Nemo"]"#,
            ]
        );
    }

    #[test]
    fn test_collections_are_deterministic() {
        let mut first = LineBuffer::new();
        let mut second = LineBuffer::new();
        collections(&mut first).unwrap();
        collections(&mut second).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.lines()[2], r#"stock: {"apple":5,"pear":1}"#);
        assert_eq!(first.lines()[4], "set: [1,2,3]");
    }

    #[test]
    fn test_reflection_downcasts() {
        let mut buf = LineBuffer::new();
        reflection(&mut buf).unwrap();
        assert_eq!(buf.lines()[0], "type of number: i32");
        assert_eq!(buf.lines()[2], "i32 with value 7");
        assert_eq!(buf.lines()[3], "String of length 5");
        assert_eq!(buf.lines()[4], "unknown type");
    }
}
