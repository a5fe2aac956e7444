use capitalone_statement_rs::ParserBuilder;
use std::env;
use std::path::Path;
use std::process;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        let program = args
            .first()
            .and_then(|arg| Path::new(arg).file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "statement_to_json".to_string());
        eprintln!("usage: {} statement.txt", program);
        process::exit(1);
    }

    // text as produced by `pdftotext -layout statement.pdf statement.txt`
    let statement = ParserBuilder::new().filename(&args[1]).parse()?;

    println!("{}", serde_json::to_string_pretty(&statement)?);

    Ok(())
}
