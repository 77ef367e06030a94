//! Text wire protocol between a client and the relay server
//!
//! Every message is `<kind>` followed by zero or more positional fields, all
//! joined with `FIELD_DELIMITER`. There is no escaping, so a field value can
//! never contain the delimiter. Messages are decoded once, at the transport
//! boundary, into `ServerMessage` / `ClientMessage`.

use crate::board::Board;
use crate::FIELD_DELIMITER;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const KIND_CONNECTED: &str = "connected";
const KIND_START: &str = "start";
const KIND_UPDATE: &str = "update";
const KIND_GAME_OVER: &str = "gameOver";
const KIND_MATCH: &str = "match";
const KIND_DONE: &str = "done";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("empty message")]
    Empty,

    #[error("unknown message kind `{0}`")]
    UnknownKind(String),

    #[error("`{kind}` message is missing field `{field}`")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },

    #[error("field `{field}` is not a valid number: `{value}`")]
    InvalidNumber { field: &'static str, value: String },

    #[error("invalid player id `{0}`")]
    InvalidPlayerId(String),

    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}

impl ProtocolError {
    /// Unknown kinds are expected from newer servers and are not a fault
    pub fn is_unknown_kind(&self) -> bool {
        matches!(self, ProtocolError::UnknownKind(_))
    }
}

/// Opaque player identity handed out by the server
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Result<Self, ProtocolError> {
        let id = id.into();
        if id.is_empty() || id.contains(FIELD_DELIMITER) {
            return Err(ProtocolError::InvalidPlayerId(id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PlayerId {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlayerId::new(s)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Server to client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// `connected_<pid>`: identity assigned to this client
    Connected { pid: PlayerId },
    /// `start_<layoutJSON>`: both players are present, here is the board
    Start { layout: Board },
    /// `update_<pid>_<score>`: a player's running score
    Update { pid: PlayerId, score: u32 },
    /// `gameOver_<winnerPid>`
    GameOver { winner: PlayerId },
}

/// Client to server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    /// `match_<pid>_<points>`
    Match { pid: PlayerId, points: u32 },
    /// `done_<pid>`: this player's board is finished
    Done { pid: PlayerId },
}

/// Positional field reader for a single message
struct Fields<'a> {
    kind: &'static str,
    parts: std::str::Split<'a, char>,
}

impl<'a> Fields<'a> {
    fn next(&mut self, field: &'static str) -> Result<&'a str, ProtocolError> {
        self.parts
            .next()
            .ok_or(ProtocolError::MissingField {
                kind: self.kind,
                field,
            })
    }

    fn pid(&mut self, field: &'static str) -> Result<PlayerId, ProtocolError> {
        self.next(field)?.parse()
    }

    fn number(&mut self, field: &'static str) -> Result<u32, ProtocolError> {
        let value = self.next(field)?;
        value.parse().map_err(|_| ProtocolError::InvalidNumber {
            field,
            value: value.to_string(),
        })
    }

    fn layout(&mut self, field: &'static str) -> Result<Board, ProtocolError> {
        let value = self.next(field)?;
        serde_json::from_str(value).map_err(|e| ProtocolError::InvalidLayout(e.to_string()))
    }
}

/// Splits off the kind; the caller maps the kind string to a `&'static str`
fn split_kind(raw: &str) -> Result<(&str, std::str::Split<'_, char>), ProtocolError> {
    if raw.is_empty() {
        return Err(ProtocolError::Empty);
    }
    let mut parts = raw.split(FIELD_DELIMITER);
    let kind = parts.next().unwrap_or_default();
    Ok((kind, parts))
}

impl FromStr for ServerMessage {
    type Err = ProtocolError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (kind, parts) = split_kind(raw)?;
        let kind = match kind {
            KIND_CONNECTED => KIND_CONNECTED,
            KIND_START => KIND_START,
            KIND_UPDATE => KIND_UPDATE,
            KIND_GAME_OVER => KIND_GAME_OVER,
            other => return Err(ProtocolError::UnknownKind(other.to_string())),
        };
        let mut fields = Fields { kind, parts };

        match kind {
            KIND_CONNECTED => Ok(ServerMessage::Connected {
                pid: fields.pid("pid")?,
            }),
            KIND_START => Ok(ServerMessage::Start {
                layout: fields.layout("layout")?,
            }),
            KIND_UPDATE => Ok(ServerMessage::Update {
                pid: fields.pid("pid")?,
                score: fields.number("score")?,
            }),
            _ => Ok(ServerMessage::GameOver {
                winner: fields.pid("winnerPid")?,
            }),
        }
    }
}

impl fmt::Display for ServerMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = FIELD_DELIMITER;
        match self {
            ServerMessage::Connected { pid } => write!(f, "{KIND_CONNECTED}{d}{pid}"),
            ServerMessage::Start { layout } => {
                let json = serde_json::to_string(layout).map_err(|_| fmt::Error)?;
                write!(f, "{KIND_START}{d}{json}")
            }
            ServerMessage::Update { pid, score } => {
                write!(f, "{KIND_UPDATE}{d}{pid}{d}{score}")
            }
            ServerMessage::GameOver { winner } => write!(f, "{KIND_GAME_OVER}{d}{winner}"),
        }
    }
}

impl FromStr for ClientMessage {
    type Err = ProtocolError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (kind, parts) = split_kind(raw)?;
        match kind {
            KIND_MATCH => {
                let mut fields = Fields {
                    kind: KIND_MATCH,
                    parts,
                };
                Ok(ClientMessage::Match {
                    pid: fields.pid("pid")?,
                    points: fields.number("points")?,
                })
            }
            KIND_DONE => {
                let mut fields = Fields {
                    kind: KIND_DONE,
                    parts,
                };
                Ok(ClientMessage::Done {
                    pid: fields.pid("pid")?,
                })
            }
            other => Err(ProtocolError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for ClientMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = FIELD_DELIMITER;
        match self {
            ClientMessage::Match { pid, points } => write!(f, "{KIND_MATCH}{d}{pid}{d}{points}"),
            ClientMessage::Done { pid } => write!(f, "{KIND_DONE}{d}{pid}"),
        }
    }
}
