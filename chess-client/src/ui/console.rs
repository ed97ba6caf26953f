//! 终端命令解析
//!
//! 每行一条命令；棋盘格子可以用代数记号（`e2`），也可以用绘制面坐标

use protocol::{Color, RoomId, Square};
use thiserror::Error;

use crate::board::CoordinateMapper;
use crate::game::UserCommand;

/// 命令帮助
pub const HELP_TEXT: &str = "\
commands:
  create               create a room named after your display name
  join <id>            join a room
  rematch              offer or accept a rematch
  name <text>          set your display name
  click <sq>           press and release on a square, e.g. click e2
  drag <sq> <sq>       drag a piece, e.g. drag e2 e4
  press <x> <y>        pointer down at surface coordinates
  release <x> <y>      pointer up at surface coordinates
  left | right         step through earlier boards
  help                 show this text
  exit                 close the connection";

/// 解析后的一行输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    /// 依次交给会话的命令
    Send(Vec<UserCommand>),
    /// 以当前显示名创建房间
    Create,
    /// 修改显示名
    SetName(String),
    Help,
}

/// 解析错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("missing argument for {0}")]
    MissingArgument(&'static str),

    #[error("invalid square: {0}")]
    InvalidSquare(String),

    #[error("invalid number: {0}")]
    InvalidNumber(String),
}

/// 解析一行输入
///
/// `color` 是当前执棋方，指针坐标按它换算成格子。
pub fn parse_line(
    line: &str,
    mapper: &CoordinateMapper,
    color: Option<Color>,
) -> Result<ConsoleInput, ParseError> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let mut args = rest.split_whitespace();

    let input = match word.to_ascii_lowercase().as_str() {
        "" => return Err(ParseError::Empty),
        "create" => ConsoleInput::Create,
        "join" => {
            let id = args.next().ok_or(ParseError::MissingArgument("join"))?;
            let room_id = id
                .parse::<RoomId>()
                .map_err(|_| ParseError::InvalidNumber(id.to_string()))?;
            send(UserCommand::JoinRoom { room_id })
        }
        "rematch" => send(UserCommand::OfferRematch),
        "exit" | "quit" => send(UserCommand::Exit),
        "name" => {
            if rest.is_empty() {
                return Err(ParseError::MissingArgument("name"));
            }
            ConsoleInput::SetName(rest.to_string())
        }
        "click" => {
            let square = square_arg(args.next(), "click")?;
            ConsoleInput::Send(vec![UserCommand::Press(square), UserCommand::Release(square)])
        }
        "drag" => {
            let from = square_arg(args.next(), "drag")?;
            let to = square_arg(args.next(), "drag")?;
            ConsoleInput::Send(vec![UserCommand::Press(from), UserCommand::Release(to)])
        }
        "press" => send(UserCommand::Press(point_arg(&mut args, "press", mapper, color)?)),
        "release" => send(UserCommand::Release(point_arg(&mut args, "release", mapper, color)?)),
        "left" => send(UserCommand::HistoryBack),
        "right" => send(UserCommand::HistoryForward),
        "help" | "?" => ConsoleInput::Help,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(input)
}

fn send(cmd: UserCommand) -> ConsoleInput {
    ConsoleInput::Send(vec![cmd])
}

fn square_arg(arg: Option<&str>, command: &'static str) -> Result<Square, ParseError> {
    let arg = arg.ok_or(ParseError::MissingArgument(command))?;
    Square::from_algebraic(arg).ok_or_else(|| ParseError::InvalidSquare(arg.to_string()))
}

fn point_arg<'a>(
    args: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    mapper: &CoordinateMapper,
    color: Option<Color>,
) -> Result<Square, ParseError> {
    let mut coord = || -> Result<f32, ParseError> {
        let arg = args.next().ok_or(ParseError::MissingArgument(command))?;
        arg.parse::<f32>()
            .map_err(|_| ParseError::InvalidNumber(arg.to_string()))
    };
    let x = coord()?;
    let y = coord()?;
    Ok(mapper.to_square(x, y, color))
}
