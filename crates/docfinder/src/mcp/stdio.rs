use crate::prelude::{eprintln, *};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

pub async fn run_stdio(global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("docfinder MCP server reading requests from stdin");
    }
    log::info!("Serving directory {} over stdio", global.url);

    let mut stdout = tokio::io::stdout();
    let mut reader = BufReader::new(tokio::io::stdin());
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            break;
        }

        let request = line.trim();
        if request.is_empty() {
            continue;
        }
        log::debug!("<- {request}");

        let response = serde_json::to_string(&super::handle_request(request, &global).await)?;
        log::debug!("-> {response}");

        stdout.write_all(response.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    log::info!("stdin closed, stopping MCP server");
    Ok(())
}
