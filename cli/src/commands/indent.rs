use plugcon_core::indent_bytes;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::commands::cli::IndentArgs;
use crate::error::CliError;

pub async fn handle_indent(args: IndentArgs) -> Result<i32, CliError> {
    let mut input = Vec::new();
    tokio::io::stdin().read_to_end(&mut input).await?;

    let mut stdout = tokio::io::stdout();
    stdout.write_all(&indent_bytes(&input, args.width)).await?;
    stdout.flush().await?;
    Ok(0)
}
