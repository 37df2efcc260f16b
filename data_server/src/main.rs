//! Development stand-in for the sensor endpoint: answers `GET /data` with
//! synthetic temperature/humidity JSON that drifts over time so the
//! gauges visibly move.

use std::io;
use std::time::Instant;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

#[tokio::main]
async fn main() -> io::Result<()> {
    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("0.0.0.0:8080"));
    let listener = TcpListener::bind(&addr).await?;

    println!("Serving GET /data on {}", addr);

    serve(listener, Instant::now()).await
}

/// Accept loop. One task per connection, so a stalled client never holds
/// up the next one — the dashboard polls with overlapping requests.
async fn serve(listener: TcpListener, started: Instant) -> io::Result<()> {
    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                tokio::spawn(async move {
                    if let Err(e) = handle(stream, started).await {
                        eprintln!("client error: {e}");
                    }
                });
            }
            Err(e) => eprintln!("accept failed: {e}"),
        }
    }
}

async fn handle(stream: TcpStream, started: Instant) -> io::Result<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;
    let path = request_line.split_whitespace().nth(1).unwrap_or("/");

    // Drain the headers, the request carries nothing we use.
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header).await? == 0 || header == "\r\n" {
            break;
        }
    }

    let response = if path == "/data" {
        let t = started.elapsed().as_secs_f64();
        let temperature = round1(25.0 + 15.0 * (t / 30.0).sin());
        let humidity = round1(55.0 + 35.0 * (t / 45.0).cos());
        let body = serde_json::json!({
            "temperature": temperature,
            "humidity": humidity,
        })
        .to_string();
        format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        )
    } else {
        String::from("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
    };

    write_half.write_all(response.as_bytes()).await?;
    write_half.flush().await
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
