use clap::{Arg, ArgAction, Command};
use log::debug;
use std::time::Instant;

pub fn build_cli() -> Command {
    debug!("⚙️ Building CLI interface...");
    let start_time = Instant::now();
    let cmd = Command::new("nxbot")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Telegram bot for Nx Witness camera snapshots and motion alerts.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("YAML configuration file; environment variables override its values (default: config.yml)")
                .global(true)
                .action(ArgAction::Set)
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .help("Enable debug logging")
                .global(true)
                .action(ArgAction::SetTrue)
        )
        .subcommand(
            Command::new("run")
                .about("Runs the Telegram bot and the motion-event HTTP server (default)")
        )
        .subcommand(
            Command::new("list-cameras")
                .about("Lists the id and name of every camera on an Nx server")
                .arg(Arg::new("nx-ip-port").value_name("NX_IP_PORT").required(true).help("IP address and port of the Nx server, e.g. 1.2.3.4:7001").action(ArgAction::Set))
                .arg(Arg::new("nx-user").value_name("NX_USER").required(true).help("User name for the Nx server").action(ArgAction::Set))
                .arg(Arg::new("nx-pass").value_name("NX_PASS").help("Password for the Nx user, prompted for when omitted").action(ArgAction::Set))
        );
    debug!("✅ CLI interface built in {:?}", start_time.elapsed());
    cmd
}
