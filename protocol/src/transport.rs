//! 传输层抽象
//!
//! 提供 Connector/FrameReader/FrameWriter traits 使上层会话与具体传输实现解耦。
//! 线上只有文本帧：每帧一条 JSON 消息（或断线哨兵）。

use async_trait::async_trait;
use futures::stream::{SplitSink, SplitStream};
use futures::{Sink, SinkExt, Stream, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::error::{ProtocolError, Result};
use crate::CONNECT_TIMEOUT;

/// 帧读取端
#[async_trait]
pub trait FrameReader: Send {
    /// 读取下一条文本帧，连接关闭时返回 `None`
    async fn read_frame(&mut self) -> Result<Option<String>>;
}

/// 帧写入端
#[async_trait]
pub trait FrameWriter: Send {
    /// 写入一条文本帧
    async fn write_frame(&mut self, text: &str) -> Result<()>;

    /// 关闭连接
    async fn close(&mut self) -> Result<()>;
}

/// 连接器 trait（客户端使用）
#[async_trait]
pub trait Connector: Send + Sync {
    type Reader: FrameReader;
    type Writer: FrameWriter;

    /// 建立连接并拆分为读写两端
    async fn connect(&self, addr: &str) -> Result<(Self::Reader, Self::Writer)>;
}

// ============================================================================
// WebSocket 实现
// ============================================================================

/// 客户端 WebSocket 流
pub type ClientStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// WebSocket 连接器
pub struct WsConnector;

#[async_trait]
impl Connector for WsConnector {
    type Reader = WsFrameReader<SplitStream<ClientStream>>;
    type Writer = WsFrameWriter<SplitSink<ClientStream, Message>>;

    async fn connect(&self, addr: &str) -> Result<(Self::Reader, Self::Writer)> {
        let (stream, _response) = timeout(CONNECT_TIMEOUT, connect_async(addr))
            .await
            .map_err(|_| ProtocolError::ConnectionTimeout)??;

        tracing::info!("WebSocket connected: {}", addr);
        Ok(split(stream))
    }
}

/// 拆分任意 WebSocket 流（客户端与服务端流均可）
pub fn split<S>(
    stream: WebSocketStream<S>,
) -> (
    WsFrameReader<SplitStream<WebSocketStream<S>>>,
    WsFrameWriter<SplitSink<WebSocketStream<S>, Message>>,
)
where
    S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin,
{
    let (sink, source) = stream.split();
    (WsFrameReader::new(source), WsFrameWriter::new(sink))
}

/// WebSocket 帧读取器
pub struct WsFrameReader<S> {
    stream: S,
}

impl<S> WsFrameReader<S> {
    pub fn new(stream: S) -> Self {
        Self { stream }
    }
}

#[async_trait]
impl<S> FrameReader for WsFrameReader<S>
where
    S: Stream<Item = std::result::Result<Message, WsError>> + Unpin + Send,
{
    async fn read_frame(&mut self) -> Result<Option<String>> {
        while let Some(msg) = self.stream.next().await {
            match msg? {
                Message::Text(text) => return Ok(Some(text.as_str().to_owned())),
                Message::Close(_) => return Ok(None),
                // ping/pong 由 tungstenite 自动应答；二进制帧不在协议内
                Message::Binary(_) | Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {
                    continue
                }
            }
        }
        Ok(None)
    }
}

/// WebSocket 帧写入器
pub struct WsFrameWriter<S> {
    sink: S,
}

impl<S> WsFrameWriter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl<S> FrameWriter for WsFrameWriter<S>
where
    S: Sink<Message, Error = WsError> + Unpin + Send,
{
    async fn write_frame(&mut self, text: &str) -> Result<()> {
        self.sink.send(Message::text(text.to_owned())).await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        match self.sink.close().await {
            Ok(()) | Err(WsError::ConnectionClosed) | Err(WsError::AlreadyClosed) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// 进程内实现（测试与回放用）
// ============================================================================

/// 进程内帧读取器
pub struct MemoryReader {
    rx: mpsc::UnboundedReceiver<String>,
}

/// 进程内帧写入器
pub struct MemoryWriter {
    tx: Option<mpsc::UnboundedSender<String>>,
}

/// 创建一对互相连通的进程内连接：(本端读, 本端写), (对端读, 对端写)
pub fn memory_pair() -> ((MemoryReader, MemoryWriter), (MemoryReader, MemoryWriter)) {
    let (a_tx, a_rx) = mpsc::unbounded_channel();
    let (b_tx, b_rx) = mpsc::unbounded_channel();
    (
        (MemoryReader { rx: a_rx }, MemoryWriter { tx: Some(b_tx) }),
        (MemoryReader { rx: b_rx }, MemoryWriter { tx: Some(a_tx) }),
    )
}

#[async_trait]
impl FrameReader for MemoryReader {
    async fn read_frame(&mut self) -> Result<Option<String>> {
        Ok(self.rx.recv().await)
    }
}

#[async_trait]
impl FrameWriter for MemoryWriter {
    async fn write_frame(&mut self, text: &str) -> Result<()> {
        let tx = self.tx.as_ref().ok_or(ProtocolError::ConnectionClosed)?;
        tx.send(text.to_owned())
            .map_err(|_| ProtocolError::ConnectionClosed)
    }

    async fn close(&mut self) -> Result<()> {
        self.tx = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::MessageCodec;
    use crate::message::{ClientMessage, ServerMessage};
    use crate::piece::Color;

    #[tokio::test]
    async fn test_websocket_connection() {
        // 启动监听
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // 客户端连接
        let client_handle = tokio::spawn(async move {
            let (mut reader, mut writer) = WsConnector
                .connect(&format!("ws://{}", addr))
                .await
                .unwrap();

            let create = MessageCodec::encode(&ClientMessage::create("test")).unwrap();
            writer.write_frame(&create).await.unwrap();

            let frame = reader.read_frame().await.unwrap().unwrap();
            match MessageCodec::decode(&frame).unwrap() {
                ServerMessage::NewRoom { room_id, color } => {
                    assert_eq!(room_id, 7);
                    assert_eq!(color, Color::White);
                }
                other => panic!("Unexpected message: {:?}", other),
            }

            let frame = reader.read_frame().await.unwrap().unwrap();
            assert!(MessageCodec::is_disconnect_sentinel(&frame));
        });

        // 服务端接受连接
        let (stream, _) = listener.accept().await.unwrap();
        let ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        let (mut reader, mut writer) = split(ws);

        let frame = reader.read_frame().await.unwrap().unwrap();
        let msg: ClientMessage = serde_json::from_str(&frame).unwrap();
        assert_eq!(msg, ClientMessage::create("test"));

        writer
            .write_frame(r#"{"msg_type":"NewRoom","room_id":7,"color":"white"}"#)
            .await
            .unwrap();
        writer.write_frame("disconnected").await.unwrap();

        client_handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_memory_pair_closes() {
        let ((mut local_reader, mut local_writer), (mut remote_reader, mut remote_writer)) =
            memory_pair();

        local_writer.write_frame("hello").await.unwrap();
        assert_eq!(remote_reader.read_frame().await.unwrap().as_deref(), Some("hello"));

        remote_writer.write_frame("world").await.unwrap();
        assert_eq!(local_reader.read_frame().await.unwrap().as_deref(), Some("world"));

        local_writer.close().await.unwrap();
        assert!(local_writer.write_frame("late").await.is_err());
        assert_eq!(remote_reader.read_frame().await.unwrap(), None);
    }
}
