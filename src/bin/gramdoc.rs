use clap::Parser;
use log::LevelFilter;
use simplelog::{Config, SimpleLogger};

use gramdoc::{
    backends::{text::TextGenerator, xml::XmlGenerator},
    grammar::Grammar,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, clap::ValueEnum)]
enum OutputFormat {
    Xml,
    Text,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Xml => write!(f, "xml"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Dump of the lexer half of the grammar
    #[arg(long, value_name = "DUMP")]
    lexer: Option<String>,

    /// Dump of the parser half of the grammar
    #[arg(long, value_name = "DUMP")]
    parser: Option<String>,

    #[arg(long)]
    output: String,

    #[arg(long, default_value_t = OutputFormat::Xml)]
    format: OutputFormat,

    /// Directory with per-section documentation blurbs
    #[arg(long)]
    sections: Option<String>,

    /// Name of the grammar's entry rule
    #[arg(long)]
    entrypoint: Option<String>,
}

fn main() {
    SimpleLogger::init(LevelFilter::Warn, Config::default()).expect("Could not initialize logging");

    let args = Args::parse();

    let mut grammar = Grammar::builder();

    if let Some(path) = &args.lexer {
        grammar = grammar.lexer_grammar(path).unwrap();
    }

    if let Some(path) = &args.parser {
        grammar = grammar.parser_grammar(path).unwrap();
    }

    if let Some(entrypoint) = &args.entrypoint {
        grammar = grammar.entrypoint(entrypoint);
    }

    let grammar = grammar.build().unwrap();

    match args.format {
        OutputFormat::Xml => {
            let mut generator = XmlGenerator::new();

            if let Some(dir) = &args.sections {
                generator = generator.section_docs(dir);
            }

            generator.generate(&args.output, &grammar);
        },
        OutputFormat::Text => {
            let mut generator = TextGenerator::new();

            if let Some(dir) = &args.sections {
                generator = generator.section_docs(dir);
            }

            generator.generate(&args.output, &grammar);
        },
    }
}
