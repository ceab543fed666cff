use strum_macros::Display;

#[derive(Clone, Copy, PartialEq, Debug, Display)]
pub enum AlarmStatus
{
    NoAlarm,
    ReadAlarm,
}

#[derive(Clone, Copy, PartialEq, Debug, Display)]
pub enum AlarmSeverity
{
    NoAlarm,
    Invalid,
}

/// Health of the last completion. All bits of a register share their
/// owner's single alarm pair; dependent readers copy it verbatim.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Alarm
{
    pub status: AlarmStatus,
    pub severity: AlarmSeverity,
}

impl Alarm
{
    pub fn none() -> Self
    {
        Alarm
        {
            status: AlarmStatus::NoAlarm,
            severity: AlarmSeverity::NoAlarm,
        }
    }

    pub fn read_invalid() -> Self
    {
        Alarm
        {
            status: AlarmStatus::ReadAlarm,
            severity: AlarmSeverity::Invalid,
        }
    }

    pub fn is_healthy(&self) -> bool
    {
        return self.status == AlarmStatus::NoAlarm;
    }
}
