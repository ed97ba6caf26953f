//! 连接会话
//!
//! 使用 protocol 库的传输层抽象；所有状态修改都发生在一个 select 循环里，不需要锁

use std::time::Duration;

use anyhow::Context;
use protocol::{
    ClientMessage, Connector, FrameReader, FrameWriter, MessageCodec, ProtocolError, WsConnector,
};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::game::{ClientState, SessionStateMachine, UserCommand};

/// 基于 WebSocket 的连接会话
pub type WsSession =
    ConnectionSession<<WsConnector as Connector>::Reader, <WsConnector as Connector>::Writer>;

/// 一次循环迭代的事件
enum LoopEvent {
    Frame(protocol::Result<Option<String>>),
    Keepalive,
    Command(Option<UserCommand>),
}

/// 连接会话：持有连接两端与状态机
pub struct ConnectionSession<R, W> {
    reader: R,
    writer: W,
    machine: SessionStateMachine,
    keepalive: Duration,
}

impl WsSession {
    /// 连接 WebSocket 服务器
    pub async fn connect(url: &str, keepalive: Duration) -> anyhow::Result<Self> {
        Self::connect_with(&WsConnector, url, keepalive).await
    }
}

impl<R: FrameReader, W: FrameWriter> ConnectionSession<R, W> {
    pub fn new(reader: R, writer: W, keepalive: Duration) -> Self {
        Self {
            reader,
            writer,
            machine: SessionStateMachine::new(),
            keepalive,
        }
    }

    /// 通过任意连接器建立会话
    pub async fn connect_with<C>(connector: &C, url: &str, keepalive: Duration) -> anyhow::Result<Self>
    where
        C: Connector<Reader = R, Writer = W>,
    {
        let (reader, writer) = connector
            .connect(url)
            .await
            .with_context(|| format!("无法连接服务器: {}", url))?;
        Ok(Self::new(reader, writer, keepalive))
    }

    pub fn machine(&self) -> &SessionStateMachine {
        &self.machine
    }

    /// 运行消息循环
    ///
    /// 收到断线哨兵、服务端关闭连接、命令通道关闭或用户退出时返回；
    /// 每处理完一个事件调用一次 `on_change`。
    pub async fn run<F>(
        &mut self,
        mut commands: mpsc::Receiver<UserCommand>,
        mut on_change: F,
    ) -> anyhow::Result<()>
    where
        F: FnMut(&SessionStateMachine),
    {
        let mut keepalive = tokio::time::interval(self.keepalive);
        keepalive.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // 第一次 tick 立即完成
        keepalive.tick().await;

        on_change(&self.machine);

        let result = loop {
            let event = tokio::select! {
                frame = self.reader.read_frame() => LoopEvent::Frame(frame),
                _ = keepalive.tick() => LoopEvent::Keepalive,
                cmd = commands.recv() => LoopEvent::Command(cmd),
            };

            match event {
                LoopEvent::Frame(Ok(Some(text))) => {
                    self.handle_frame(&text);
                    if self.machine.state() == ClientState::Disconnected {
                        tracing::info!("Server ended the session");
                        on_change(&self.machine);
                        break Ok(());
                    }
                }
                LoopEvent::Frame(Ok(None)) => {
                    tracing::info!("Server closed the connection");
                    break Ok(());
                }
                LoopEvent::Frame(Err(e)) => {
                    tracing::error!("Receive error: {}", e);
                    break Err(anyhow::Error::new(e).context("连接中断"));
                }
                LoopEvent::Keepalive => {
                    let ping = ClientMessage::Ping {
                        room_id: self.machine.session().room_or_zero(),
                    };
                    self.send(&ping).await;
                    continue;
                }
                LoopEvent::Command(None) => {
                    tracing::debug!("Command channel closed");
                    break Ok(());
                }
                LoopEvent::Command(Some(cmd)) => {
                    let exit = cmd == UserCommand::Exit;
                    if let Some(msg) = self.machine.apply_user_command(cmd) {
                        self.send(&msg).await;
                    }
                    if exit {
                        on_change(&self.machine);
                        break Ok(());
                    }
                }
            }

            on_change(&self.machine);
        };

        if let Err(e) = self.writer.close().await {
            tracing::warn!("Failed to close connection: {}", e);
        }
        result
    }

    /// 解码并应用一条入站帧；无法解析的帧直接忽略
    fn handle_frame(&mut self, text: &str) {
        match MessageCodec::decode(text) {
            Ok(msg) => {
                tracing::debug!("Received {}", msg.name());
                self.machine.apply_inbound(msg);
            }
            Err(e) => {
                tracing::warn!("Ignoring undecodable frame: {}", e);
            }
        }
    }

    /// 立即发送；失败只记录，不重试
    async fn send(&mut self, msg: &ClientMessage) {
        let result = match MessageCodec::encode(msg) {
            Ok(text) => self.writer.write_frame(&text).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => tracing::debug!("Sent {}", msg.name()),
            Err(ProtocolError::ConnectionClosed) => {
                tracing::warn!("Connection closed, dropping {}", msg.name())
            }
            Err(e) => tracing::error!("Failed to send {}: {}", msg.name(), e),
        }
    }
}
