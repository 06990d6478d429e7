// routesim: Inter-Domain Routing Simulator
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Module for defining events

use crate::bgp::BgpEvent;
use crate::{AsId, Prefix};
use std::collections::VecDeque;

/// BGP message in flight, sent from `from` to `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Sender of the message
    pub from: AsId,
    /// Receiver of the message
    pub to: AsId,
    /// Content
    pub msg: BgpEvent,
}

impl Event {
    /// Returns the prefix for which this event talks about.
    pub fn prefix(&self) -> Prefix {
        self.msg.prefix()
    }
}

/// Event queue for enqueuing events.
pub(crate) type EventQueue = VecDeque<Event>;
