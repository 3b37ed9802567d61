use crate::camera::camera_info::CameraInfo;
use crate::camera::nx_client::NxClient;
use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use log::info;
use std::io::{IsTerminal, Write};

pub async fn handle_list_cameras_cli(args: &ArgMatches) -> Result<()> {
    let ip_port = args
        .get_one::<String>("nx-ip-port")
        .context("NX_IP_PORT argument missing")?;
    let user = args
        .get_one::<String>("nx-user")
        .context("NX_USER argument missing")?;
    let pass = match args.get_one::<String>("nx-pass") {
        Some(pass) => pass.clone(),
        None => prompt_password()?,
    };

    let client = NxClient::connect(ip_port, user, &pass)
        .await
        .with_context(|| format!("Failed to connect to Nx API at '{}'", ip_port))?;
    let cameras = client.get_cameras().await.context("Failed to retrieve cameras")?;
    info!("📷 {} camera(s) on {}", cameras.len(), ip_port);

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(render_camera_list(&cameras).as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn prompt_password() -> Result<String> {
    if !std::io::stdin().is_terminal() {
        bail!("No password given and stdin is not a terminal; pass NX_PASS as the third argument.");
    }
    eprint!("Password: ");
    rpassword::read_password().context("Failed to read password")
}

pub fn render_camera_list(cameras: &[CameraInfo]) -> String {
    cameras
        .iter()
        .map(|camera| {
            format!(
                "---------------------\nCamera ID: {}\nCamera Name: {}\n",
                camera.id, camera.name
            )
        })
        .collect()
}
