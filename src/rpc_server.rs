//! BookmarkHub RPC server: JSON-RPC over stdin/stdout for the extension host.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"bookmark.add", "params":{"url":"...","title":"..."}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}

use std::time::Instant;

use bookmarkhub::app::App;
use bookmarkhub::rpc_handler::handle_method;
use bookmarkhub::services::config::AppConfig;
use bookmarkhub::services::logging;

use serde_json::{json, Value};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Fixed-window rate limiter: at most `max_per_second` requests per window.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self { window_start: Instant::now(), request_count: 0, max_per_second }
    }

    /// Returns true if the request is allowed, false if rate-limited.
    fn check(&mut self) -> bool {
        if self.window_start.elapsed().as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

async fn respond(stdout: &mut io::Stdout, response: Value) -> std::io::Result<()> {
    let mut line = response.to_string();
    line.push('\n');
    stdout.write_all(line.as_bytes()).await?;
    stdout.flush().await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = AppConfig::load()?;
    logging::init(&config.log_filter);

    let mut rate_limiter = RateLimiter::new(config.rate_limit);
    let app = match App::new(config).await {
        Ok(app) => Mutex::new(app),
        Err(e) => {
            error!(error = %e, "failed to initialize BookmarkHub");
            return Err(e);
        }
    };

    let mut stdout = io::stdout();
    respond(&mut stdout, json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")})).await?;
    info!("rpc server ready");

    let mut lines = BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "unparseable request");
                respond(&mut stdout, json!({"id": null, "error": format!("parse error: {}", e)})).await?;
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);

        if !rate_limiter.check() {
            respond(&mut stdout, json!({"id": id, "error": "rate limit exceeded"})).await?;
            continue;
        }

        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let response = match handle_method(&app, method, &params).await {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => {
                warn!(%method, error = %err, "request failed");
                json!({"id": id, "error": err})
            }
        };
        respond(&mut stdout, response).await?;
    }

    info!("stdin closed, shutting down");
    Ok(())
}
