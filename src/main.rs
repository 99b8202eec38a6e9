use std::net::SocketAddr;

use anyhow::anyhow;
use game_of_life_web::{
    request::{handle_advance, parse_query},
    GameOfLifeWebOpt, Result,
};
use log::{debug, info, warn};
use structopt::StructOpt;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};

const MAX_REQUEST_HEAD: usize = 8 * 1024;

#[tokio::main]
async fn main() -> Result<()> {
    let opt = GameOfLifeWebOpt::from_args();
    let opt_clone = opt.clone();
    std::env::set_var("RUST_LOG", opt.rust_log.clone());
    env_logger::init();

    info!("start game_of_life_web with config: {:#?}", opt_clone);

    let listener = TcpListener::bind(opt.listen).await?;
    info!("listening on {}", opt.listen);

    loop {
        let (stream, peer) = listener.accept().await?;
        let opt = opt.clone();
        tokio::task::spawn(async move {
            if let Err(err) = serve_connection(stream, peer, opt).await {
                warn!("connection from {} failed: {:#}", peer, err);
            }
        });
    }
}

async fn serve_connection(
    mut stream: TcpStream,
    peer: SocketAddr,
    opt: GameOfLifeWebOpt,
) -> Result<()> {
    let head = read_request_head(&mut stream).await?;
    let (method, target) = parse_request_line(&head)?;
    debug!("{} {} {}", peer, method, target);

    let response = if method != "GET" {
        plain_response("405 Method Not Allowed", "only GET is supported")
    } else {
        let (path, query) = split_target(&target);
        match path {
            "/" => index_response(&opt).await,
            "/advance" => advance_response(query),
            _ => plain_response("404 Not Found", "no such route"),
        }
    };

    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await?;
    Ok(())
}

async fn read_request_head(stream: &mut TcpStream) -> Result<String> {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        let read = stream.read(&mut buf).await?;
        if read == 0 {
            break;
        }
        head.extend_from_slice(&buf[..read]);
        if head.windows(4).any(|window| window == b"\r\n\r\n") {
            break;
        }
        if head.len() > MAX_REQUEST_HEAD {
            return Err(anyhow!("request head exceeds {} bytes", MAX_REQUEST_HEAD).into());
        }
    }
    Ok(String::from_utf8_lossy(&head).into_owned())
}

fn parse_request_line(head: &str) -> Result<(String, String)> {
    let request_line = head
        .lines()
        .next()
        .ok_or(anyhow!("empty request"))?;
    let mut parts = request_line.split_whitespace();
    let method = parts
        .next()
        .ok_or(anyhow!("request line has no method: '{}'", request_line))?;
    let target = parts
        .next()
        .ok_or(anyhow!("request line has no target: '{}'", request_line))?;
    Ok((method.to_owned(), target.to_owned()))
}

fn split_target(target: &str) -> (&str, &str) {
    target.split_once('?').unwrap_or((target, ""))
}

fn advance_response(query: &str) -> String {
    let params = parse_query(query);
    match handle_advance(&params) {
        Ok(body) => http_response("200 OK", "application/json", &body),
        Err(err) => {
            warn!("rejected advance request: {}", err);
            plain_response("400 Bad Request", &err.to_string())
        }
    }
}

async fn index_response(opt: &GameOfLifeWebOpt) -> String {
    match tokio::fs::read_to_string(&opt.index_page).await {
        Ok(page) => http_response("200 OK", "text/html; charset=utf-8", &page),
        Err(err) => {
            warn!(
                "fail to read index page {}: {:#}",
                opt.index_page.display(),
                err
            );
            plain_response("500 Internal Server Error", "landing page unavailable")
        }
    }
}

fn plain_response(status: &str, body: &str) -> String {
    http_response(status, "text/plain; charset=utf-8", body)
}

fn http_response(status: &str, content_type: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        content_type,
        body.len(),
        body
    )
}

#[cfg(test)]
mod tests {
    use super::{parse_request_line, split_target};

    #[test]
    fn request_line_parses_method_and_target() {
        let head = "GET /advance?M=3&N=3 HTTP/1.1\r\nHost: localhost\r\n\r\n";
        let (method, target) = parse_request_line(head).unwrap();
        assert_eq!(method, "GET");
        assert_eq!(target, "/advance?M=3&N=3");
    }

    #[test]
    fn target_splits_into_path_and_query() {
        assert_eq!(split_target("/advance?M=3"), ("/advance", "M=3"));
        assert_eq!(split_target("/"), ("/", ""));
    }
}
