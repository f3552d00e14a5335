use serde::Serialize;

use crate::types::{Amount, Day, HolderId, PolicyId, Temperature};

/// Domain events emitted by mutating ledger operations. The ledger returns
/// them from each call instead of invoking listeners; the transport layer
/// (or the CLI driver here) drains and forwards them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LedgerEvent {
    PolicyOpened {
        policy_id: PolicyId,
        holder: HolderId,
        premium: Amount,
    },
    /// One per policy per broadcast. Closed policies included: every stored
    /// window shifts.
    TemperatureRecorded {
        policy_id: PolicyId,
        temperature: Temperature,
    },
    SettlementPaid {
        policy_id: PolicyId,
        holder: HolderId,
        amount: Amount,
    },
    /// A triggered settlement the pool could not fund. The policy stays
    /// Active; an operator must refund the pool before the next broadcast
    /// can pay it out.
    SettlementFailed {
        policy_id: PolicyId,
        required: Amount,
        available: Amount,
    },
}

/// Log record: one event stamped with the broadcast day it occurred on.
/// `log[i]` has implicit sequence number `i`; replay order is append order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub day: Day,
    pub event: LedgerEvent,
}

pub type EventLog = Vec<LogEntry>;

#[cfg(test)]
mod tests {
    use std::io::{BufWriter, Write};

    use super::*;

    #[test]
    fn policy_opened_json_shape() {
        let entry = LogEntry {
            day: Day(0),
            event: LedgerEvent::PolicyOpened {
                policy_id: PolicyId(0),
                holder: HolderId(7),
                premium: 1_000_000_000,
            },
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"day":0,"event":{"PolicyOpened":{"policy_id":0,"holder":7,"premium":1000000000}}}"#
        );
    }

    #[test]
    fn settlement_paid_serializes_amount() {
        let entry = LogEntry {
            day: Day(12),
            event: LedgerEvent::SettlementPaid {
                policy_id: PolicyId(3),
                holder: HolderId(1),
                amount: 100_000_000_000,
            },
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["day"], 12);
        assert_eq!(value["event"]["SettlementPaid"]["policy_id"], 3);
        assert_eq!(value["event"]["SettlementPaid"]["amount"], 100_000_000_000u64);
    }

    #[test]
    fn temperature_recorded_carries_signed_degrees() {
        let entry = LogEntry {
            day: Day(2),
            event: LedgerEvent::TemperatureRecorded {
                policy_id: PolicyId(0),
                temperature: Temperature(-5),
            },
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["event"]["TemperatureRecorded"]["temperature"], -5);
    }

    #[test]
    fn ndjson_stream_one_line_per_event() {
        let entries = vec![
            LogEntry {
                day: Day(0),
                event: LedgerEvent::PolicyOpened {
                    policy_id: PolicyId(0),
                    holder: HolderId(1),
                    premium: 1_000_000_000,
                },
            },
            LogEntry {
                day: Day(1),
                event: LedgerEvent::TemperatureRecorded {
                    policy_id: PolicyId(0),
                    temperature: Temperature(42),
                },
            },
            LogEntry {
                day: Day(5),
                event: LedgerEvent::SettlementPaid {
                    policy_id: PolicyId(0),
                    holder: HolderId(1),
                    amount: 100_000_000_000,
                },
            },
        ];

        let mut buf: Vec<u8> = Vec::new();
        {
            let mut writer = BufWriter::new(&mut buf);
            for e in &entries {
                serde_json::to_writer(&mut writer, e).unwrap();
                writeln!(writer).unwrap();
            }
        }

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.split('\n').filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), 3);
        for line in &lines {
            let v: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(v.get("day").is_some(), "missing 'day' key in: {line}");
            assert!(v.get("event").is_some(), "missing 'event' key in: {line}");
        }
    }
}
