use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "docx2html")]
#[command(about = "Convert DOCX files to plain structural HTML")]
struct Cli {
    /// Input DOCX files; each output is written next to its input with
    /// an .html extension
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut failed = 0usize;
    for input in &cli.inputs {
        if !input.is_file() {
            eprintln!("{}: file not found, skipping", input.display());
            failed += 1;
            continue;
        }
        let output = input.with_extension("html");
        match docx2html::convert_docx_to_html(input, &output) {
            Ok(()) => println!("Created {}", output.display()),
            Err(e) => {
                eprintln!("{}: {}", input.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }
}
