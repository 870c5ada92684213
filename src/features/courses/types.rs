use serde::{Deserialize, Serialize};
use std::fmt;

/// Course as published by the course API. Read-only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    pub name: String,
    pub instructor: String,
    pub available_seats: u32,
    pub price: f64,
    pub image: String,
}

impl CourseRecord {
    #[must_use]
    pub fn is_sold_out(&self) -> bool {
        self.available_seats == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardStyle {
    Standard,
    SoldOut,
}

/// View model for one course card.
#[derive(Clone, Debug, PartialEq)]
pub struct CourseCard {
    pub name: String,
    pub instructor: String,
    pub available_seats: u32,
    pub price: f64,
    pub image: String,
    pub style: CardStyle,
    pub action_enabled: bool,
}

impl CourseCard {
    pub const ACTION_LABEL: &'static str = "Learn now!";
}

impl From<&CourseRecord> for CourseCard {
    fn from(record: &CourseRecord) -> Self {
        let sold_out = record.is_sold_out();
        Self {
            name: record.name.clone(),
            instructor: record.instructor.clone(),
            available_seats: record.available_seats,
            price: record.price,
            image: record.image.clone(),
            style: if sold_out {
                CardStyle::SoldOut
            } else {
                CardStyle::Standard
            },
            action_enabled: !sold_out,
        }
    }
}

impl fmt::Display for CourseCard {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.style {
            CardStyle::Standard => "",
            CardStyle::SoldOut => " [sold out]",
        };
        let action = if self.action_enabled {
            format!("[ {} ]", Self::ACTION_LABEL)
        } else {
            format!("[ {} ] (disabled)", Self::ACTION_LABEL)
        };

        writeln!(formatter, "{}{marker}", self.name)?;
        writeln!(formatter, "  {} Instructor", self.instructor)?;
        writeln!(formatter, "  {} Available Seats", self.available_seats)?;
        writeln!(formatter, "  {} Price", self.price)?;
        writeln!(formatter, "  {}", self.image)?;
        write!(formatter, "  {action}")
    }
}
