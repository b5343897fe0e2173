
mod config;
mod error;

use std::fs;
use std::io;
use std::path::Path;

use clap::{App, Arg};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ir::{ir_to_asm, Emulator, IrGenerator};
use parser::collector::ProductionCollector;
use parser::language::{Language, CODING_MAP, GRAMMAR};
use parser::lexer::tokenize;
use parser::semantic::SemanticAnalyzer;
use parser::{SymbolTable, SyntaxAnalyzer};

use config::Config;
use error::CompileError;

fn read_file(path: &Path) -> Result<String, CompileError> {
    fs::read_to_string(path).map_err(|source| CompileError::Read {path: path.to_path_buf(), source})
}

fn write_lines<I>(config: &Config, name: &str, lines: I) -> Result<(), CompileError>
    where I: IntoIterator, I::Item: AsRef<str>
{
    let path = config.artifact(name);
    let mut contents = String::new();
    for line in lines {
        contents.push_str(line.as_ref());
        contents.push('\n');
    }

    fs::write(&path, contents).map_err(|source| CompileError::Write {path: path.clone(), source})?;
    debug!(path = %path.display(), "wrote artifact");

    Ok(())
}

fn load_language(config: &Config) -> Result<Language, CompileError> {
    let coding_map = match &config.coding_map {
        Some(path) => read_file(path)?,
        None => CODING_MAP.to_string(),
    };
    let grammar = match &config.grammar {
        Some(path) => read_file(path)?,
        None => GRAMMAR.to_string(),
    };

    Ok(Language::load(&coding_map, &grammar)?)
}

/*
 * Runs every stage in order and writes the artifact of each one as soon
 * as it is produced, so a failing stage leaves the previous ones on disk.
 */
fn compile(config: &Config) -> Result<(), CompileError> {
    let source = read_file(&config.input)?;
    fs::create_dir_all(&config.out_dir)
        .map_err(|source| CompileError::Write {path: config.out_dir.clone(), source})?;

    let language = load_language(config)?;

    let tokens = tokenize(&source, &language.registry)?;
    write_lines(config, "token.txt", tokens.iter().map(|t| t.to_string()))?;

    let mut symbols = SymbolTable::new();
    symbols.prepopulate(&tokens);
    write_lines(config, "old_symbol_table.txt", symbols.dump_lines())?;

    write_lines(config, "lr_table.csv", language.table.dump())?;
    info!(states = language.table.state_count(), "built the LR(1) table");

    let mut collector = ProductionCollector::new(language.table.grammar().begin_production().clone());
    let mut analyzer = SemanticAnalyzer::new();
    let mut generator = IrGenerator::new();

    let parsed = {
        let mut parser = SyntaxAnalyzer::new(&language.table, &mut symbols);
        parser.load_tokens(tokens);
        parser.register_observer(&mut collector);
        if !config.parse_only {
            parser.register_observer(&mut analyzer);
            parser.register_observer(&mut generator);
        }
        parser.run()
    };

    write_lines(config, "parser_list.txt", collector.dump())?;
    parsed?;
    if config.parse_only {
        return Ok(())
    }

    write_lines(config, "new_symbol_table.txt", symbols.dump_lines())?;
    if !analyzer.errors().is_empty() {
        return Err(CompileError::Semantic(analyzer.errors().to_vec()))
    }
    if let Some(e) = generator.errors().first() {
        return Err(e.clone().into())
    }

    write_lines(config, "intermediate_code.txt", generator.dump())?;
    let instructions = generator.into_instructions();

    if config.emulate {
        let result = match Emulator::load(&instructions).execute()? {
            Some(value) => value.to_string(),
            None => "No return value".to_string(),
        };
        write_lines(config, "emulate_result.txt", Some(result))?;
    }

    let asm = ir_to_asm(&instructions)?;
    let path = config.artifact("assembly_language.asm");
    fs::write(&path, asm).map_err(|source| CompileError::Write {path, source})?;

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(true).with_level(true))
        .with(filter)
        .init();
}

fn main() {
    let matches = App::new("minic")
        .version("1.0")
        .author("thejohncrafter")
        .about("Compiles a small C-like language to RISC-V assembly")
        .arg(Arg::with_name("input")
            .help("The source file (defaults to data/in/input_code.txt)")
            .index(1))
        .arg(Arg::with_name("out-dir")
            .short("o")
            .long("out-dir")
            .help("Where to write the artifacts of every stage")
            .takes_value(true))
        .arg(Arg::with_name("coding-map")
            .short("c")
            .long("coding-map")
            .help("Read the terminal table from this file instead of the built-in one")
            .takes_value(true))
        .arg(Arg::with_name("grammar")
            .short("g")
            .long("grammar")
            .help("Read the grammar from this file instead of the built-in one")
            .takes_value(true))
        .arg(Arg::with_name("parse-only")
            .short("p")
            .long("parse-only")
            .help("Stop after syntax analysis"))
        .arg(Arg::with_name("emulate")
            .short("e")
            .long("emulate")
            .help("Run the IR and write what it returns"))
        .arg(Arg::with_name("verbose")
            .short("v")
            .long("verbose")
            .help("Log every stage"))
        .get_matches();

    let config = Config::from_matches(&matches);
    init_logging(config.verbose);

    let success = match compile(&config) {
        Ok(()) => true,
        Err(e) => {
            println!("{}", e);
            if let CompileError::Semantic(errors) = &e {
                errors.iter().for_each(|e| println!("  {}", e));
            }
            false
        }
    };

    std::process::exit(if success {0} else {1});
}
