pub mod deepseek;
pub mod mock_responder;
