use anyhow::Result;
use serde::Serialize;
use serde_json::{json, Value};
use std::io::{self, Write};

pub fn envelope<T: Serialize>(op: &str, result: &T) -> Result<Value> {
    Ok(json!({ "op": op, "result": serde_json::to_value(result)? }))
}

pub fn print_result<T: Serialize>(op: &str, result: &T) -> Result<()> {
    let env = envelope(op, result)?;
    let mut out = io::stdout().lock();
    serde_json::to_writer(&mut out, &env)?;
    writeln!(&mut out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Counts { members: usize }

    #[test]
    fn envelope_wraps_result_with_op() {
        let env = envelope("team", &Counts { members: 2 }).unwrap();
        assert_eq!(env["op"], "team");
        assert_eq!(env["result"]["members"], 2);
    }
}
