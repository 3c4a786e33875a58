use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Parser)]
#[command(name = "blackout", version, about = "Multi-show sponsorship contract tooling")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract text blocks from a contract PDF and print them as JSON.
    Inspect { pdf: PathBuf },

    /// Classify a contract's blocks into shows and print the result.
    Classify {
        pdf: PathBuf,
        #[arg(long, value_enum, default_value = "global-redact")]
        schema: Schema,
    },

    /// Produce a redacted copy of the contract for one show.
    Redact {
        pdf: PathBuf,
        /// The show whose copy to produce (as named by classification).
        #[arg(long)]
        show: String,
        #[arg(long, value_enum, default_value = "global-redact")]
        schema: Schema,
        /// Output path; defaults next to the input.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Extract structured contract data per show.
    Extract {
        pdf: PathBuf,
        #[arg(long, value_enum, default_value = "per-insertion")]
        layout: Layout,
        /// Classification schema used before extraction. The default keeps
        /// aggregate figures visible to the model.
        #[arg(long, value_enum, default_value = "standard")]
        schema: Schema,
        /// Append the rows to the configured Google Sheet instead of
        /// printing JSON.
        #[arg(long)]
        push: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Schema {
    Standard,
    GlobalRedact,
}

impl From<Schema> for blackout_core::ClassifyVariant {
    fn from(schema: Schema) -> Self {
        match schema {
            Schema::Standard => Self::Standard,
            Schema::GlobalRedact => Self::GlobalRedact,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Layout {
    ShowLevel,
    PerInsertion,
}

impl From<Layout> for blackout_core::ExtractionVariant {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::ShowLevel => Self::ShowLevel,
            Layout::PerInsertion => Self::PerInsertion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackout_core::{ClassifyVariant, ExtractionVariant};
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn extract_accepts_schema_flag() {
        let cli = Cli::try_parse_from([
            "blackout",
            "extract",
            "contract.pdf",
            "--schema",
            "global-redact",
        ])
        .unwrap();
        let Command::Extract {
            schema,
            layout,
            push,
            ..
        } = cli.command
        else {
            panic!("parsed wrong subcommand");
        };
        assert_eq!(ClassifyVariant::from(schema), ClassifyVariant::GlobalRedact);
        assert_eq!(ExtractionVariant::from(layout), ExtractionVariant::PerInsertion);
        assert!(!push);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Inspect { pdf } => commands::inspect(&pdf),
        Command::Classify { pdf, schema } => commands::classify(&pdf, schema.into()).await,
        Command::Redact {
            pdf,
            show,
            schema,
            out,
        } => commands::redact(&pdf, &show, schema.into(), out).await,
        Command::Extract {
            pdf,
            layout,
            schema,
            push,
        } => commands::extract(&pdf, layout.into(), schema.into(), push).await,
    }
}
