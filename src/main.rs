use clap::Parser;
use snp_runner::{cli, commands, logging};

fn main() {
    logging::init();
    let args = cli::Args::parse();

    let result = match args.command {
        cli::Commands::Run {
            ticket,
            options,
            sequence,
            parameters,
            runner,
        } => commands::run::run(ticket, options, &sequence, &parameters, &runner),
        cli::Commands::Submit { job_file, runner } => commands::submit::run(&job_file, &runner),
        cli::Commands::Wiggle {
            msa_file,
            seq_id,
            msa_output,
            wig_output,
        } => commands::wiggle::run(&msa_file, &seq_id, &msa_output, &wig_output).map(|_| 0),
        cli::Commands::Figure {
            table,
            output_prefix,
        } => commands::figure::run(&table, &output_prefix).map(|_| 0),
        cli::Commands::InitConfig { path } => commands::init_config::run(path.as_deref()).map(|_| 0),
        cli::Commands::CheckTool { tool, config } => {
            commands::check_tool::run(tool, config.as_deref()).map(|_| 0)
        }
    };

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
