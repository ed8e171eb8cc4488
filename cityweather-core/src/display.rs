//! Output regions a lookup writes into.
//!
//! A [`DisplaySurface`] stands in for whatever UI shows the result: four
//! text regions plus a way to raise a blocking alert. [`Panel`] keeps
//! everything in memory so a front-end can print it afterwards.

/// One of the four text regions of the weather display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    City,
    Temp,
    Desc,
    Humidity,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::City => "city",
            Region::Temp => "temp",
            Region::Desc => "desc",
            Region::Humidity => "humidity",
        }
    }

    /// Regions in display order.
    pub const fn all() -> &'static [Region] {
        &[Region::City, Region::Temp, Region::Desc, Region::Humidity]
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait DisplaySurface {
    /// Replace the text content of a region.
    fn set_text(&mut self, region: Region, text: &str);

    /// Tell the user something went wrong before any request was made.
    fn alert(&mut self, message: &str);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Panel {
    city: String,
    temp: String,
    desc: String,
    humidity: String,
    alerts: Vec<String>,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self, region: Region) -> &str {
        match region {
            Region::City => &self.city,
            Region::Temp => &self.temp,
            Region::Desc => &self.desc,
            Region::Humidity => &self.humidity,
        }
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Drain alerts raised since the last call.
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    /// Non-empty region texts in display order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        Region::all().iter().map(|r| self.text(*r)).filter(|t| !t.is_empty())
    }
}

impl DisplaySurface for Panel {
    fn set_text(&mut self, region: Region, text: &str) {
        let slot = match region {
            Region::City => &mut self.city,
            Region::Temp => &mut self.temp,
            Region::Desc => &mut self.desc,
            Region::Humidity => &mut self.humidity,
        };
        slot.clear();
        slot.push_str(text);
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
