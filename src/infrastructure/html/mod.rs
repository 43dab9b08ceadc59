// src/infrastructure/html/mod.rs
//! Static new-tab page rendered with minijinja.
use crate::application::views::bookmark_view::ListView;
use crate::domain::clock::{ClockReading, DayHeader, DATE_SLOT, DAY_SLOT};
use crate::infrastructure::error::InfrastructureError;
use minijinja::{context, Environment};
use serde::Serialize;
use std::fmt;
use tracing::instrument;

const PAGE_TEMPLATE: &str = "newtab.html";
const PAGE_TITLE: &str = "New Tab";

#[derive(Debug, Serialize)]
struct ClockSlot {
    slot: String,
    label: String,
    text: String,
}

impl From<ClockReading> for ClockSlot {
    fn from(reading: ClockReading) -> Self {
        Self {
            text: format!("{} ({})", reading.time, reading.date),
            slot: reading.slot,
            label: reading.label,
        }
    }
}

pub struct PageRenderer {
    env: Environment<'static>,
}

impl fmt::Debug for PageRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageRenderer")
            .field("env", &"<Environment>")
            .finish()
    }
}

impl PageRenderer {
    pub fn new() -> Result<Self, InfrastructureError> {
        let mut env = Environment::new();
        // `.html` names get auto-escaping, so bookmark names cannot inject markup
        env.add_template(PAGE_TEMPLATE, include_str!("newtab.html"))?;
        Ok(Self { env })
    }

    #[instrument(level = "debug", skip_all, fields(items = view.items.len()))]
    pub fn render(
        &self,
        view: &ListView,
        header: &DayHeader,
        clocks: Vec<ClockReading>,
    ) -> Result<String, InfrastructureError> {
        let clocks: Vec<ClockSlot> = clocks.into_iter().map(ClockSlot::from).collect();
        let template = self.env.get_template(PAGE_TEMPLATE)?;
        let html = template.render(context! {
            title => PAGE_TITLE,
            view => view,
            header => context! { day => &header.day, date => &header.date },
            day_slot => DAY_SLOT,
            date_slot => DATE_SLOT,
            clocks => clocks,
        })?;
        Ok(html)
    }
}
