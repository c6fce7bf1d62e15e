use crate::types::FlagMatch;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

/// Settings shared by the commands that launch the analysis tool.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct RunnerOptions {
    /// Config file to use instead of the per-user one
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding one working directory per ticket
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// SNP analysis program to launch
    #[arg(long)]
    pub tool: Option<String>,

    /// How the -x (aligned input) flag is recognised
    #[arg(long, value_enum)]
    pub flag_match: Option<FlagMatch>,

    /// Add -n when the sequence looks like nucleotides
    #[arg(long)]
    pub detect_alphabet: bool,

    /// Move the tool's result files into this directory after a successful run
    #[arg(long)]
    pub collect: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Prepare a job directory and run the SNP analysis tool on it
    Run {
        /// Ticket number, used as the job directory name
        #[arg(long)]
        ticket: String,
        /// Options passed verbatim to the analysis tool
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        options: String,
        /// FASTA file with the sequences to analyse
        #[arg(long)]
        sequence: PathBuf,
        /// Parameters file copied into the job directory
        #[arg(long)]
        parameters: PathBuf,
        #[command(flatten)]
        runner: RunnerOptions,
    },

    /// Run a job described by a JSON document
    Submit {
        /// JSON with ticket_number, options, parameters and sequence
        job_file: PathBuf,
        #[command(flatten)]
        runner: RunnerOptions,
    },

    /// Compute a per-column entropy wiggle track from an alignment
    Wiggle {
        /// Aligned FASTA file (may be gzip/bzip2/xz compressed)
        msa_file: PathBuf,
        /// Id (or id prefix) of the reference sequence
        seq_id: String,
        /// Output alignment restricted to the reference's columns
        #[arg(short = 'm', long = "msa-output", default_value = "msa.afa")]
        msa_output: PathBuf,
        /// Output wiggle file
        #[arg(short = 'w', long = "wig-output", default_value = "entropy.wig")]
        wig_output: PathBuf,
    },

    /// Plot score and sequence count per position from a foma table
    Figure {
        /// The tool's foma.table
        table: PathBuf,
        /// Location and prefix for the figure
        output_prefix: String,
    },

    /// Write a config file with the default settings
    InitConfig {
        /// Where to write it (defaults to the per-user config location)
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Verify that the analysis tool can be launched
    CheckTool {
        /// Program to check (defaults to the configured tool)
        #[arg(long)]
        tool: Option<String>,
        /// Config file to use instead of the per-user one
        #[arg(long)]
        config: Option<PathBuf>,
    },
}
