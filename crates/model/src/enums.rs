// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Enumerations for the trading domain model.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{AsRefStr, Display, EnumIter, EnumString, FromRepr};

/// The direction of an order, trade or position exposure.
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    FromRepr,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    /// Buying exposure.
    Long = 1,
    /// Selling exposure.
    Short = 2,
    /// Netted exposure with no resolvable side (venue artifact).
    Net = 3,
}

impl Direction {
    /// Returns the opposite direction, with [`Direction::Net`] mapping to itself.
    #[must_use]
    pub const fn opposite(&self) -> Self {
        match self {
            Self::Long => Self::Short,
            Self::Short => Self::Long,
            Self::Net => Self::Net,
        }
    }
}

/// The position offset instruction carried by an order or fill.
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    FromRepr,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Offset {
    /// No offset instruction (venue artifact).
    None = 0,
    /// Opens new exposure.
    Open = 1,
    /// Closes existing exposure.
    Close = 2,
    /// Closes exposure opened in the current session (SHFE/INE convention).
    CloseToday = 3,
    /// Closes exposure carried over from a previous session (SHFE/INE convention).
    CloseYesterday = 4,
}

impl Offset {
    /// Returns whether this offset opens new exposure.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// Returns whether this offset closes existing exposure.
    #[must_use]
    pub const fn is_close(&self) -> bool {
        matches!(self, Self::Close | Self::CloseToday | Self::CloseYesterday)
    }
}

/// The type of order.
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    FromRepr,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// A limit order executing at or better than the specified price.
    Limit = 1,
    /// A market order executing at whatever price is available.
    Market = 2,
}

/// The status of an order at the trading venue.
///
/// An order is considered _active_ (working or in-flight) for the following status:
/// - `SUBMITTING`
/// - `NOT_TRADED`
/// - `PART_TRADED`
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    FromRepr,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// The order was sent to the venue and awaits acknowledgement.
    Submitting = 1,
    /// The order is working at the venue with no fills yet.
    NotTraded = 2,
    /// The order is working at the venue and partially filled.
    PartTraded = 3,
    /// The order is completely filled (closed/done).
    AllTraded = 4,
    /// The order was cancelled (closed/done).
    Cancelled = 5,
    /// The order was rejected by the venue (closed/done).
    Rejected = 6,
}

impl OrderStatus {
    /// Returns whether the order is still working or in-flight at the venue.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Submitting | Self::NotTraded | Self::PartTraded)
    }
}

/// Classifies a fill by its effect on the accounts position book.
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    FromRepr,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeClass {
    /// A buy opening long exposure.
    OpenLong = 1,
    /// A sell opening short exposure.
    OpenShort = 2,
    /// A sell closing long exposure.
    CloseLong = 3,
    /// A buy covering short exposure.
    CloseShort = 4,
}

impl TradeClass {
    /// Classifies a fill from its direction and offset.
    ///
    /// Returns `None` when either component is unresolved ([`Direction::Net`] or
    /// [`Offset::None`]), which venues emit for netted or non-actionable executions.
    #[must_use]
    pub const fn of(direction: Direction, offset: Offset) -> Option<Self> {
        match (direction, offset) {
            (Direction::Long, Offset::Open) => Some(Self::OpenLong),
            (Direction::Short, Offset::Open) => Some(Self::OpenShort),
            (Direction::Short, Offset::Close | Offset::CloseToday | Offset::CloseYesterday) => {
                Some(Self::CloseLong)
            }
            (Direction::Long, Offset::Close | Offset::CloseToday | Offset::CloseYesterday) => {
                Some(Self::CloseShort)
            }
            _ => None,
        }
    }
}

enum_strum_serde!(Direction);
enum_strum_serde!(Offset);
enum_strum_serde!(OrderType);
enum_strum_serde!(OrderStatus);
enum_strum_serde!(TradeClass);

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Direction::Long, "LONG")]
    #[case(Direction::Short, "SHORT")]
    #[case(Direction::Net, "NET")]
    fn test_direction_display(#[case] value: Direction, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
        assert_eq!(Direction::from_str(expected).unwrap(), value);
    }

    #[rstest]
    #[case(Direction::Long, Direction::Short)]
    #[case(Direction::Short, Direction::Long)]
    #[case(Direction::Net, Direction::Net)]
    fn test_direction_opposite(#[case] value: Direction, #[case] expected: Direction) {
        assert_eq!(value.opposite(), expected);
    }

    #[rstest]
    #[case(Offset::None, false, false)]
    #[case(Offset::Open, true, false)]
    #[case(Offset::Close, false, true)]
    #[case(Offset::CloseToday, false, true)]
    #[case(Offset::CloseYesterday, false, true)]
    fn test_offset_predicates(#[case] value: Offset, #[case] is_open: bool, #[case] is_close: bool) {
        assert_eq!(value.is_open(), is_open);
        assert_eq!(value.is_close(), is_close);
    }

    #[rstest]
    #[case(Offset::CloseYesterday, "CLOSE_YESTERDAY")]
    #[case(Offset::None, "NONE")]
    fn test_offset_display(#[case] value: Offset, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
        assert_eq!(Offset::from_str(expected).unwrap(), value);
    }

    #[rstest]
    #[case(OrderStatus::Submitting, true)]
    #[case(OrderStatus::NotTraded, true)]
    #[case(OrderStatus::PartTraded, true)]
    #[case(OrderStatus::AllTraded, false)]
    #[case(OrderStatus::Cancelled, false)]
    #[case(OrderStatus::Rejected, false)]
    fn test_order_status_is_active(#[case] value: OrderStatus, #[case] expected: bool) {
        assert_eq!(value.is_active(), expected);
    }

    #[rstest]
    #[case(Direction::Long, Offset::Open, Some(TradeClass::OpenLong))]
    #[case(Direction::Short, Offset::Open, Some(TradeClass::OpenShort))]
    #[case(Direction::Short, Offset::Close, Some(TradeClass::CloseLong))]
    #[case(Direction::Short, Offset::CloseToday, Some(TradeClass::CloseLong))]
    #[case(Direction::Long, Offset::Close, Some(TradeClass::CloseShort))]
    #[case(Direction::Long, Offset::CloseYesterday, Some(TradeClass::CloseShort))]
    #[case(Direction::Net, Offset::Open, None)]
    #[case(Direction::Long, Offset::None, None)]
    fn test_trade_class_of(
        #[case] direction: Direction,
        #[case] offset: Offset,
        #[case] expected: Option<TradeClass>,
    ) {
        assert_eq!(TradeClass::of(direction, offset), expected);
    }

    #[rstest]
    fn test_enum_serde_round_trip() {
        let json = serde_json::to_string(&OrderStatus::PartTraded).unwrap();
        assert_eq!(json, "\"PART_TRADED\"");
        let deserialized: OrderStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, OrderStatus::PartTraded);
    }
}
