pub mod key_server;
pub mod stub_tool;
