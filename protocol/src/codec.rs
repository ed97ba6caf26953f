//! 文本帧编解码
//!
//! 入站消息有三种形状：
//! - `{"msg_type": "Possible", "possible_moves": [...]}`
//! - `{"Board": {"current_board": "...", "last_move": null}}`
//! - 裸字符串 `disconnected`
//!
//! 解码前统一改写为第一种形状，再交给 serde。

use serde_json::{Map, Value};

use crate::constants::DISCONNECTED_SENTINEL;
use crate::error::{ProtocolError, Result};
use crate::message::{ClientMessage, ServerMessage, MSG_TYPE_KEY};

/// 消息编解码器
pub struct MessageCodec;

impl MessageCodec {
    /// 编码出站消息
    pub fn encode(msg: &ClientMessage) -> Result<String> {
        Ok(serde_json::to_string(msg)?)
    }

    /// 解码入站帧
    pub fn decode(text: &str) -> Result<ServerMessage> {
        let text = text.trim();
        if Self::is_disconnect_sentinel(text) {
            return Ok(ServerMessage::Disconnected);
        }

        let value: Value = serde_json::from_str(text)?;
        let normalized = Self::normalize(value)?;
        Ok(serde_json::from_value(normalized)?)
    }

    /// 是否是断线哨兵（裸文本或 JSON 字符串，不区分大小写）
    ///
    /// serde 把单元变体写成 `"Disconnected"`，所以大小写都要接受。
    pub fn is_disconnect_sentinel(text: &str) -> bool {
        let text = text.trim();
        let inner = text
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .unwrap_or(text);
        inner.eq_ignore_ascii_case(DISCONNECTED_SENTINEL)
    }

    /// 把单键包装形式改写为 msg_type 信封
    fn normalize(value: Value) -> Result<Value> {
        let Value::Object(map) = value else {
            return Err(ProtocolError::MalformedEnvelope);
        };

        if map.contains_key(MSG_TYPE_KEY) {
            return Ok(Value::Object(map));
        }

        if map.len() != 1 {
            return Err(ProtocolError::MalformedEnvelope);
        }

        let Some((name, payload)) = map.into_iter().next() else {
            return Err(ProtocolError::MalformedEnvelope);
        };
        let mut fields = match payload {
            Value::Object(fields) => fields,
            Value::Null => Map::new(),
            _ => return Err(ProtocolError::MalformedEnvelope),
        };
        fields.insert(MSG_TYPE_KEY.to_string(), Value::String(name));
        Ok(Value::Object(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, INITIAL_BOARD};
    use crate::message::RoomEntry;
    use crate::moves::Move;
    use crate::piece::{Color, Square};
    use serde_json::json;

    fn sq(row: u8, col: u8) -> Square {
        Square::new_unchecked(row, col)
    }

    #[test]
    fn test_move_roundtrip() {
        let msg = ClientMessage::Move {
            make_move: Move::new(sq(1, 1), sq(2, 2)),
            room_id: 5,
        };
        let text = MessageCodec::encode(&msg).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            json!({"msg_type": "Move", "make_move": [[1, 1], [2, 2]], "room_id": 5})
        );

        let decoded: ClientMessage = serde_json::from_str(&text).unwrap();
        match decoded {
            ClientMessage::Move { make_move, room_id } => {
                assert_eq!(make_move.from, sq(1, 1));
                assert_eq!(make_move.to, sq(2, 2));
                assert_eq!(room_id, 5);
            }
            other => panic!("Wrong message type: {:?}", other),
        }
    }

    #[test]
    fn test_decode_tagged_envelope() {
        let msg = MessageCodec::decode(r#"{"msg_type":"NewRoom","room_id":17,"color":"black"}"#)
            .unwrap();
        assert_eq!(
            msg,
            ServerMessage::NewRoom {
                room_id: 17,
                color: Color::Black
            }
        );
    }

    #[test]
    fn test_decode_wrapped_envelope() {
        let text = json!({"Board": {"current_board": INITIAL_BOARD, "last_move": [[1, 4], [3, 4]]}})
            .to_string();
        match MessageCodec::decode(&text).unwrap() {
            ServerMessage::Board {
                current_board,
                last_move,
            } => {
                assert_eq!(current_board, Board::initial());
                assert_eq!(last_move, Some(Move::new(sq(1, 4), sq(3, 4))));
            }
            other => panic!("Wrong message type: {:?}", other),
        }
    }

    #[test]
    fn test_decode_null_last_move() {
        let text = json!({"msg_type": "Board", "current_board": INITIAL_BOARD, "last_move": null})
            .to_string();
        assert!(matches!(
            MessageCodec::decode(&text).unwrap(),
            ServerMessage::Board { last_move: None, .. }
        ));
    }

    #[test]
    fn test_decode_wrapped_unit_variant() {
        assert_eq!(
            MessageCodec::decode(r#"{"GameResultDraw": null}"#).unwrap(),
            ServerMessage::GameResultDraw
        );
        assert_eq!(
            MessageCodec::decode(r#"{"GameResultWhiteWon": {}}"#).unwrap(),
            ServerMessage::GameResultWhiteWon
        );
        assert_eq!(
            MessageCodec::decode(r#"{"msg_type":"GameResultBlackWon"}"#).unwrap(),
            ServerMessage::GameResultBlackWon
        );
    }

    #[test]
    fn test_decode_rooms_both_shapes() {
        let current = MessageCodec::decode(
            r#"{"msg_type":"Rooms","room_names":[[1,"alice"],[2,"bob"]]}"#,
        )
        .unwrap();
        assert_eq!(
            current,
            ServerMessage::Rooms {
                room_names: vec![RoomEntry::new(1, "alice"), RoomEntry::new(2, "bob")]
            }
        );

        let legacy = MessageCodec::decode(r#"{"msg_type":"Rooms","rooms":[3]}"#).unwrap();
        assert_eq!(
            legacy,
            ServerMessage::Rooms {
                room_names: vec![RoomEntry::new(3, "Room 3")]
            }
        );
    }

    #[test]
    fn test_decode_possible_and_rematch() {
        assert_eq!(
            MessageCodec::decode(r#"{"msg_type":"Possible","possible_moves":[[3,4],[4,3]]}"#)
                .unwrap(),
            ServerMessage::Possible {
                possible_moves: vec![sq(3, 4), sq(4, 3)]
            }
        );
        assert_eq!(
            MessageCodec::decode(r#"{"Rematch":{"my_offer":true}}"#).unwrap(),
            ServerMessage::Rematch { my_offer: true }
        );
        assert_eq!(
            MessageCodec::decode(r#"{"msg_type":"PlayersOnline","count":12}"#).unwrap(),
            ServerMessage::PlayersOnline { count: 12 }
        );
    }

    #[test]
    fn test_disconnect_sentinel() {
        assert_eq!(
            MessageCodec::decode("disconnected").unwrap(),
            ServerMessage::Disconnected
        );
        assert_eq!(
            MessageCodec::decode("\"disconnected\"\n").unwrap(),
            ServerMessage::Disconnected
        );
        assert_eq!(
            MessageCodec::decode("\"Disconnected\"").unwrap(),
            ServerMessage::Disconnected
        );
        assert_eq!(
            MessageCodec::decode("DISCONNECTED").unwrap(),
            ServerMessage::Disconnected
        );
        assert!(!MessageCodec::is_disconnect_sentinel("\"disconnected"));
        // 结构化信封里的同名变体不是哨兵
        assert_eq!(
            MessageCodec::decode(r#"{"msg_type":"Disconnected"}"#).unwrap(),
            ServerMessage::Unknown
        );
    }

    #[test]
    fn test_malformed_input_is_an_error() {
        assert!(MessageCodec::decode("not json").is_err());
        assert!(MessageCodec::decode("[1,2,3]").is_err());
        assert!(MessageCodec::decode(r#"{"a":{},"b":{}}"#).is_err());
        assert!(MessageCodec::decode(r#"{"Board":{"current_board":"short"}}"#).is_err());
        assert!(MessageCodec::decode(r#"{"Possible":[1,2]}"#).is_err());
    }
}
