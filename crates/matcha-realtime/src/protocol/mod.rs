//! Realtime wire format

mod frames;

pub use frames::{
    decode, encode, ChatFrame, ChatInbound, ErrorFrame, Frame, NotificationFrame,
    NotificationInbound,
};
