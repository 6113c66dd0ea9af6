pub mod composer;
pub mod contact_list;
pub mod message_list;
pub mod session_header;
