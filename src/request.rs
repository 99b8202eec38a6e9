use log::debug;
use serde_json::Value;

use crate::{
    errors::RequestError,
    game::{Cell, Frame},
    StdResult,
};

type RequestResult<T> = StdResult<T, RequestError>;

/// Decoded query parameters in arrival order. Repeated keys are kept, the
/// liveCells wire format relies on it.
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

pub fn parse_query(raw: &str) -> QueryParams {
    let pairs = raw
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (percent_decode(key), percent_decode(value))
        })
        .collect();
    QueryParams(pairs)
}

fn percent_decode(src: &str) -> String {
    let mut out = Vec::with_capacity(src.len());
    let bytes = src.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                let decoded = src
                    .get(i + 1..i + 3)
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());
                match decoded {
                    Some(byte) => {
                        out.push(byte);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn parse_bound(params: &QueryParams, key: &str) -> RequestResult<i64> {
    let raw = params
        .get(key)
        .ok_or_else(|| RequestError::MalformedParameter(format!("{} is missing", key)))?;
    raw.trim().parse().map_err(|_| {
        RequestError::MalformedParameter(format!("{} is not an integer: '{}'", key, raw))
    })
}

/// Reads `liveCells[0][]`, `liveCells[1][]`, ... until the first index with
/// no values. Every present index must carry exactly the x and y integers.
fn parse_live_cells(params: &QueryParams) -> RequestResult<Vec<Cell>> {
    let mut live_cells = Vec::new();
    for index in 0.. {
        let key = format!("liveCells[{}][]", index);
        let values = params.get_all(&key);
        if values.is_empty() {
            break;
        }
        if values.len() != 2 {
            return Err(RequestError::MalformedCell(format!(
                "cell #{} has {} coordinates, expected 2",
                index,
                values.len()
            )));
        }
        let x = parse_coordinate(values[0], index)?;
        let y = parse_coordinate(values[1], index)?;
        live_cells.push(Cell::new(x, y));
    }
    Ok(live_cells)
}

fn parse_coordinate(raw: &str, index: i32) -> RequestResult<i64> {
    raw.trim().parse().map_err(|_| {
        RequestError::MalformedCell(format!(
            "cell #{} coordinate is not an integer: '{}'",
            index, raw
        ))
    })
}

/// Runs one /advance request: parse bounds and cells, advance the frame,
/// serialize the successor's live cells as a JSON array of [x, y] pairs,
/// wrapped in the callback when one was supplied.
pub fn handle_advance(params: &QueryParams) -> RequestResult<String> {
    let m = parse_bound(params, "M")?;
    let n = parse_bound(params, "N")?;
    let live_cells = parse_live_cells(params)?;
    debug!("advance: {}x{} board, {} live cells", m, n, live_cells.len());

    let frame = Frame::new(m, n, live_cells);
    let next_frame = frame.advance();

    let pairs = next_frame
        .active_cells()
        .into_iter()
        .map(|cell| Value::Array(vec![Value::from(cell.x), Value::from(cell.y)]))
        .collect();
    let body = Value::Array(pairs).to_string();

    Ok(wrap_callback(body, params.get("callback")))
}

fn wrap_callback(body: String, callback: Option<&str>) -> String {
    match callback {
        Some(name) => format!("{}({})", name, body),
        None => body,
    }
}
