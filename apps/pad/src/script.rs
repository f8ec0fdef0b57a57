//! Line-oriented command language driving the pad from stdin or a file.

use anyhow::{anyhow, bail, Context};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PadCommand {
    Press { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Release,
    Predict,
    Reset,
    Show,
    Quit,
}

/// Parses one line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> anyhow::Result<Option<PadCommand>> {
    let line = line.split('#').next().unwrap_or_default().trim();
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match verb.to_ascii_lowercase().as_str() {
        "press" | "down" => {
            let (x, y) = point(verb, &args)?;
            PadCommand::Press { x, y }
        }
        "move" | "drag" => {
            let (x, y) = point(verb, &args)?;
            PadCommand::Move { x, y }
        }
        "release" | "up" => no_args(verb, &args, PadCommand::Release)?,
        "predict" => no_args(verb, &args, PadCommand::Predict)?,
        "reset" => no_args(verb, &args, PadCommand::Reset)?,
        "show" => no_args(verb, &args, PadCommand::Show)?,
        "quit" | "exit" => no_args(verb, &args, PadCommand::Quit)?,
        other => bail!("unknown command '{other}'"),
    };
    Ok(Some(command))
}

fn point(verb: &str, args: &[&str]) -> anyhow::Result<(f64, f64)> {
    let [x, y] = args else {
        return Err(anyhow!("'{verb}' expects X Y, got {} argument(s)", args.len()));
    };
    let x = x
        .parse()
        .with_context(|| format!("'{verb}': X '{x}' is not a number"))?;
    let y = y
        .parse()
        .with_context(|| format!("'{verb}': Y '{y}' is not a number"))?;
    Ok((x, y))
}

fn no_args(verb: &str, args: &[&str], command: PadCommand) -> anyhow::Result<PadCommand> {
    if !args.is_empty() {
        bail!("'{verb}' takes no arguments");
    }
    Ok(command)
}
