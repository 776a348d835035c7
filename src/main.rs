use anyhow::Context;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use playlist_it::{AppConfig, PlaylistManager, SpotifyClient};

async fn prompt<R>(lines: &mut tokio::io::Lines<R>, message: &str) -> anyhow::Result<String>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    let mut stdout = tokio::io::stdout();
    stdout.write_all(format!("{}\n", message).as_bytes()).await?;
    stdout.flush().await?;
    let line = lines
        .next_line()
        .await?
        .context("stdin closed before an answer was given")?;
    Ok(line.trim().to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load()?;
    config.validate()?;

    let client = Arc::new(SpotifyClient::new(&config.spotify)?);
    let manager = PlaylistManager::new(client.clone(), client, config.resolver.clone());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let text = prompt(&mut lines, "Enter a sentence to make a playlist out of:").await?;
    let title = prompt(&mut lines, "Enter a title for the playlist:").await?;

    let playlist = manager
        .make_playlist_from_text(&text, &title)
        .await
        .context("could not build the playlist")?;

    println!("{}", playlist.external_url);
    Ok(())
}
