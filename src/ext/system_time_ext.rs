use std::time::SystemTime;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub trait SystemTimeExt {
    fn to_offset_date_time(&self) -> OffsetDateTime;
    fn to_display_string(&self) -> String;
}

impl SystemTimeExt for SystemTime {
    fn to_offset_date_time(&self) -> OffsetDateTime {
        OffsetDateTime::from(*self)
    }

    fn to_display_string(&self) -> String {
        self.to_offset_date_time()
            .format(&Rfc3339)
            .unwrap_or_else(|_| "unknown".to_string())
    }
}
