use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of build_cli() in src/main.rs, reduced to what completions need.
// Build scripts can't access src/ modules.
fn build_cli() -> Command {
    Command::new("feedmark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render RSS/Atom feed content as Markdown")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert an HTML fragment to Markdown (default command)")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("feed")
                .about("List the items of an RSS or Atom document")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("source")
                        .long("source")
                        .value_name("URL")
                        .value_hint(ValueHint::Url),
                )
                .arg(Arg::new("limit").long("limit").short('n').value_name("N"))
                .arg(Arg::new("detail").long("detail").action(ArgAction::SetTrue))
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
        )
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = build_cli();

    generate_to(Bash, &mut cmd, "feedmark", &outdir)?;
    generate_to(Zsh, &mut cmd, "feedmark", &outdir)?;
    generate_to(Fish, &mut cmd, "feedmark", &outdir)?;

    println!("cargo:rerun-if-changed=build.rs");

    Ok(())
}
