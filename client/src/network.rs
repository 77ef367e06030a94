//! Client network layer: the transport capability and the event loop
//!
//! Messages travel as `\n`-terminated text lines over a single TCP stream.
//! Outbound text is queued on an unbounded channel and written by a
//! dedicated task, so the session never blocks on the socket.

use crate::game::Session;
use crate::input::parse_click;
use crate::rendering::Renderer;
use log::{debug, error, info, warn};
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::OwnedReadHalf;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Outbound half of the connection as seen by the session.
///
/// Sending is fire-and-forget: there is no acknowledgement and failures are
/// only logged.
pub trait Transport {
    fn send(&mut self, text: &str);
}

impl Transport for mpsc::UnboundedSender<String> {
    fn send(&mut self, text: &str) {
        if let Err(e) = mpsc::UnboundedSender::send(self, text.to_owned()) {
            error!("Failed to queue message for sending: {}", e);
        }
    }
}

/// Spawns the task that drains queued text onto the socket, one line per message
pub fn spawn_writer<W>(
    mut writer: W,
    mut outbound: mpsc::UnboundedReceiver<String>,
) -> JoinHandle<()>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        while let Some(text) = outbound.recv().await {
            debug!("sending: {}", text);
            if let Err(e) = write_line(&mut writer, &text).await {
                error!("Failed to send message: {}", e);
                break;
            }
        }
    })
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, text: &str) -> io::Result<()> {
    writer.write_all(text.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await
}

/// Splits an inbound byte stream into protocol messages
pub struct MessageReader<R> {
    lines: Lines<R>,
}

impl<R: AsyncBufRead + Unpin> MessageReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    /// Next non-blank line, or `None` once the peer has closed the stream
    pub async fn next_message(&mut self) -> io::Result<Option<String>> {
        while let Some(line) = self.lines.next_line().await? {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_owned()));
            }
        }
        Ok(None)
    }
}

pub struct Client {
    session: Session<mpsc::UnboundedSender<String>>,
    inbound: MessageReader<BufReader<OwnedReadHalf>>,
    writer: JoinHandle<()>,
    renderer: Renderer,
}

impl Client {
    pub async fn connect(
        server_addr: &str,
        renderer: Renderer,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let stream = TcpStream::connect(server_addr).await?;
        info!("Connection opened to server {}", server_addr);

        let (reader, writer) = stream.into_split();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let writer = spawn_writer(writer, outbound_rx);

        Ok(Client {
            session: Session::new(outbound_tx),
            inbound: MessageReader::new(BufReader::new(reader)),
            writer,
            renderer,
        })
    }

    pub fn session(&self) -> &Session<mpsc::UnboundedSender<String>> {
        &self.session
    }

    /// Processes server messages, local clicks and redraws one at a time until
    /// the server closes the connection.
    pub async fn run<I>(&mut self, input: I) -> Result<(), Box<dyn std::error::Error>>
    where
        I: AsyncBufRead + Unpin,
    {
        let mut clicks = input.lines();
        let mut input_open = true;
        let mut changes = self.session.subscribe();

        self.renderer.render(&self.session.snapshot());

        loop {
            tokio::select! {
                message = self.inbound.next_message() => {
                    match message {
                        Ok(Some(raw)) => self.session.on_message(&raw),
                        Ok(None) => {
                            info!("Server closed the connection");
                            break;
                        }
                        Err(e) => {
                            error!("Error receiving message: {}", e);
                            break;
                        }
                    }
                },

                line = clicks.next_line(), if input_open => {
                    match line {
                        Ok(Some(line)) if line.trim().is_empty() => {}
                        Ok(Some(line)) => match parse_click(&line) {
                            Some(position) => self.session.on_tile_click(position),
                            None => warn!("Expected `<layer> <row> <column>`, got {:?}", line),
                        },
                        Ok(None) => {
                            debug!("Local input closed");
                            input_open = false;
                        }
                        Err(e) => {
                            error!("Error reading local input: {}", e);
                            input_open = false;
                        }
                    }
                },

                changed = changes.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let snapshot = changes.borrow_and_update().clone();
                    self.renderer.render(&snapshot);
                },
            }
        }

        if self.writer.is_finished() {
            warn!("Outbound writer stopped before the connection closed");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::io::Builder;

    #[test]
    fn test_channel_transport_queues_text() {
        let (mut tx, mut rx) = mpsc::unbounded_channel::<String>();
        Transport::send(&mut tx, "done_p1");
        assert_eq!(rx.try_recv().unwrap(), "done_p1");
    }

    #[test]
    fn test_channel_transport_fails_silently() {
        let (mut tx, rx) = mpsc::unbounded_channel::<String>();
        drop(rx);
        Transport::send(&mut tx, "done_p1");
    }

    #[tokio::test]
    async fn test_reader_splits_lines() {
        let stream = Builder::new()
            .read(b"connected_p1\nupdate_p2_")
            .read(b"5\r\n\n  \ngameOver_p2\n")
            .build();
        let mut reader = MessageReader::new(BufReader::new(stream));

        assert_eq!(
            reader.next_message().await.unwrap().as_deref(),
            Some("connected_p1")
        );
        assert_eq!(
            reader.next_message().await.unwrap().as_deref(),
            Some("update_p2_5")
        );
        assert_eq!(
            reader.next_message().await.unwrap().as_deref(),
            Some("gameOver_p2")
        );
        assert_eq!(reader.next_message().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_writer_frames_messages() {
        let stream = Builder::new()
            .write(b"match_p1_8")
            .write(b"\n")
            .write(b"done_p1")
            .write(b"\n")
            .build();
        let (tx, rx) = mpsc::unbounded_channel();

        let handle = spawn_writer(stream, rx);
        tx.send("match_p1_8".to_string()).unwrap();
        tx.send("done_p1".to_string()).unwrap();
        drop(tx);

        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_connect_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = Client::connect(&addr.to_string(), Renderer::new(false)).await;
        assert!(result.is_err());
    }
}
