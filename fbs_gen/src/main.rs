use clap::{Args, Parser, Subcommand};
use fbs_gen::cmds;
use fbs_gen::codegen::cpp::{CppCodeGeneratorOptions, DEFAULT_MAX_SPARSENESS};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "fbs-gen")]
#[command(about = "C++ header generator for resolved binary schema models", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /* Generate C++ headers from resolved schema models */
    Codegen {
        /* Input schema models (.yaml, .yml or .json) */
        #[arg(short = 'f', long = "files", value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /* Output directory for generated headers */
        #[arg(
            short = 'o',
            long = "output",
            value_name = "DIR",
            default_value = "generated"
        )]
        output_dir: PathBuf,

        #[command(flatten)]
        flags: GeneratorFlags,

        /* Enable verbose output */
        #[arg(short = 'v', long = "verbose")]
        verbose: bool,
    },

    /* Print a make rule for the header generated from each schema model */
    Depends {
        /* Input schema models (.yaml, .yml or .json) */
        #[arg(short = 'f', long = "files", value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /* Output directory the headers are generated into */
        #[arg(
            short = 'o',
            long = "output",
            value_name = "DIR",
            default_value = "generated"
        )]
        output_dir: PathBuf,
    },

    /* Analyze schema models and report what would be generated */
    Analyze {
        /* Input schema models (.yaml, .yml or .json) */
        #[arg(short = 'f', long = "files", value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /* Average gap between enum values above which no name table is emitted */
        #[arg(long = "max-sparseness", default_value_t = DEFAULT_MAX_SPARSENESS)]
        max_sparseness: i64,
    },
}

#[derive(Args)]
struct GeneratorFlags {
    /* Emit mutators and the GetMutable root accessor */
    #[arg(long = "mutable-buffer")]
    mutable_buffer: bool,

    /* Emit `enum class` declarations with an explicit underlying type */
    #[arg(long = "scoped-enums")]
    scoped_enums: bool,

    /* Prefix enum entries with the enum name */
    #[arg(long = "prefixed-enums")]
    prefixed_enums: bool,

    /* Include the headers generated for included schema files */
    #[arg(long = "include-dependence-headers")]
    include_dependence_headers: bool,

    /* Average gap between enum values above which no name table is emitted */
    #[arg(long = "max-sparseness", default_value_t = DEFAULT_MAX_SPARSENESS)]
    max_sparseness: i64,
}

impl From<GeneratorFlags> for CppCodeGeneratorOptions {
    fn from(flags: GeneratorFlags) -> Self {
        CppCodeGeneratorOptions {
            mutable_buffer: flags.mutable_buffer,
            scoped_enums: flags.scoped_enums,
            prefixed_enums: flags.prefixed_enums,
            include_dependence_headers: flags.include_dependence_headers,
            max_sparseness: flags.max_sparseness,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Codegen { verbose: true, .. });
    init_tracing(verbose);

    match cli.command {
        Commands::Codegen {
            files,
            output_dir,
            flags,
            verbose,
        } => {
            cmds::codegen::run(files, output_dir, flags.into(), verbose)?;
        }

        Commands::Depends { files, output_dir } => {
            cmds::depends::run(files, output_dir)?;
        }

        Commands::Analyze {
            files,
            max_sparseness,
        } => {
            cmds::analyze::run(files, max_sparseness)?;
        }
    }

    Ok(())
}
