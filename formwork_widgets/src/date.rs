// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Date fields: a closed/open popover machine over staged calendar days.
//!
//! The committed external value is an RFC 3339 instant (single) or a
//! `{from, to}` pair of instants (range). While the popover is open the
//! user edits a *staged* day in the display timezone; confirming converts
//! the staged day back to an absolute instant and commits it, closing
//! discards it, and resetting commits an explicitly empty value. Display
//! text always derives from whichever value is authoritative for the
//! current state: staged while open, committed while closed.

use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc,
};
use formwork_registry::{
    BindingContext, FieldWidget, RenderEnv, Ui, WidgetError, WidgetEvent,
};
use formwork_schema::{DateOptions, FieldSchema};
use formwork_value::Value;
use tracing::{debug, warn};

/// Range separator, an en dash.
const RANGE_SEPARATOR: &str = " – ";

/// Whether the widget picks one day or a `{from, to}` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateMode {
    /// One calendar day.
    Single,
    /// A `{from, to}` day pair.
    Range,
}

/// The display timezone for staging and formatting.
///
/// The committed value is always an absolute instant; this zone only
/// affects which calendar day an instant maps to. Without configuration
/// the runtime's ambient timezone applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    /// The runtime's ambient timezone.
    #[default]
    Local,
    /// Coordinated universal time.
    Utc,
    /// A fixed offset such as `+03:00`.
    Fixed(FixedOffset),
}

impl Zone {
    /// Parses `"UTC"`, `"local"`, or a fixed offset like `"+03:00"`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "UTC" | "utc" | "Z" => Some(Self::Utc),
            "local" | "Local" => Some(Self::Local),
            other => other.parse::<FixedOffset>().ok().map(Self::Fixed),
        }
    }

    /// Resolves a configured zone string, falling back to the ambient
    /// timezone when absent or unparsable.
    #[must_use]
    pub fn resolve(configured: Option<&str>) -> Self {
        match configured {
            None => Self::Local,
            Some(s) => Self::parse(s).unwrap_or_else(|| {
                warn!(timezone = s, "unparsable display timezone, using ambient");
                Self::Local
            }),
        }
    }

    /// The calendar day an instant falls on in this zone.
    #[must_use]
    pub fn day_of(self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            Self::Utc => instant.date_naive(),
            Self::Fixed(offset) => instant.with_timezone(&offset).date_naive(),
            Self::Local => instant.with_timezone(&chrono::Local).date_naive(),
        }
    }

    /// The absolute instant of midnight of `day` in this zone.
    #[must_use]
    pub fn instant_of(self, day: NaiveDate) -> DateTime<Utc> {
        let midnight = day.and_time(NaiveTime::MIN);
        match self {
            Self::Utc => Utc.from_utc_datetime(&midnight),
            Self::Fixed(offset) => local_to_utc(&offset, midnight),
            Self::Local => local_to_utc(&chrono::Local, midnight),
        }
    }
}

/// Maps a zone-local wall time to UTC, taking the earlier of ambiguous
/// readings and falling back to a UTC reading when a DST gap skips the
/// wall time entirely.
fn local_to_utc<Tz: TimeZone>(tz: &Tz, wall: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&wall).earliest() {
        Some(dt) => dt.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&wall),
    }
}

/// The staged (uncommitted) selection while the popover is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagedDates {
    /// A single staged day.
    Day(NaiveDate),
    /// A staged day pair.
    Range {
        /// Range start.
        from: NaiveDate,
        /// Range end.
        to: NaiveDate,
    },
}

/// The date field widget, in single or range mode.
#[derive(Debug)]
pub struct DateWidget {
    mode: DateMode,
    zone: Zone,
    open: bool,
    staged: Option<StagedDates>,
}

impl DateWidget {
    /// Creates a widget for the given mode and options.
    #[must_use]
    pub fn new(mode: DateMode, options: Option<&DateOptions>) -> Self {
        let zone = Zone::resolve(options.and_then(|o| o.timezone.as_deref()));
        Self {
            mode,
            zone,
            open: false,
            staged: None,
        }
    }

    /// The resolved display zone.
    #[must_use]
    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Returns `true` while the popover is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The staged selection, meaningful while open.
    #[must_use]
    pub fn staged(&self) -> Option<StagedDates> {
        self.staged
    }

    /// Opens the popover, staging the committed value in the display zone.
    pub fn open(&mut self, ctx: &BindingContext) {
        self.staged = self.staged_from_value(ctx.value());
        self.open = true;
    }

    /// Stages a single day. Ignored while closed; range widgets reject it.
    pub fn stage_day(&mut self, day: NaiveDate) -> Result<(), WidgetError> {
        if self.mode != DateMode::Single {
            return Err(WidgetError::UnsupportedEvent {
                widget: "range date",
            });
        }
        if self.open {
            self.staged = Some(StagedDates::Day(day));
        } else {
            debug!("day staged while closed, ignoring");
        }
        Ok(())
    }

    /// Stages a day pair. Ignored while closed; single widgets reject it.
    pub fn stage_range(&mut self, from: NaiveDate, to: NaiveDate) -> Result<(), WidgetError> {
        if self.mode != DateMode::Range {
            return Err(WidgetError::UnsupportedEvent {
                widget: "single date",
            });
        }
        if self.open {
            self.staged = Some(StagedDates::Range { from, to });
        } else {
            debug!("range staged while closed, ignoring");
        }
        Ok(())
    }

    /// Clears the staged selection, keeping the popover open.
    pub fn clear_stage(&mut self) {
        if self.open {
            self.staged = None;
        }
    }

    /// Commits the staged selection and closes.
    ///
    /// An empty staged selection commits an explicit "nothing": `Null` in
    /// single mode, `{from: Null, to: Null}` in range mode.
    pub fn confirm(&mut self, ctx: &mut BindingContext) {
        if !self.open {
            debug!("confirm while closed, ignoring");
            return;
        }
        let committed = match (self.mode, self.staged) {
            (DateMode::Single, Some(StagedDates::Day(day))) => {
                Value::Text(to_iso(self.zone.instant_of(day)))
            }
            (DateMode::Single, _) => Value::Null,
            (DateMode::Range, Some(StagedDates::Range { from, to })) => Value::object_from([
                ("from", Value::Text(to_iso(self.zone.instant_of(from)))),
                ("to", Value::Text(to_iso(self.zone.instant_of(to)))),
            ]),
            (DateMode::Range, _) => {
                Value::object_from([("from", Value::Null), ("to", Value::Null)])
            }
        };
        ctx.commit(committed);
        self.open = false;
        self.staged = None;
    }

    /// Closes without committing, discarding staged edits.
    pub fn close(&mut self) {
        self.open = false;
        self.staged = None;
    }

    /// Clears the staged selection, commits an empty value, and closes.
    pub fn reset(&mut self, ctx: &mut BindingContext) {
        self.staged = None;
        let empty = match self.mode {
            DateMode::Single => Value::empty_text(),
            DateMode::Range => Value::object_from([
                ("from", Value::empty_text()),
                ("to", Value::empty_text()),
            ]),
        };
        ctx.commit(empty);
        self.open = false;
    }

    /// The display text for the current state: staged while open,
    /// committed while closed; empty when nothing is selected.
    #[must_use]
    pub fn display(&self, ctx: &BindingContext) -> String {
        let source = if self.open {
            self.staged
        } else {
            self.staged_from_value(ctx.value())
        };
        match source {
            Some(StagedDates::Day(day)) => format_day(day),
            Some(StagedDates::Range { from, to }) => {
                format!("{}{RANGE_SEPARATOR}{}", format_day(from), format_day(to))
            }
            None => String::new(),
        }
    }

    /// Interprets the committed external value as staged days in the
    /// display zone. Partial ranges and unparsable instants read as empty.
    fn staged_from_value(&self, value: &Value) -> Option<StagedDates> {
        match self.mode {
            DateMode::Single => {
                let text = value.as_text().filter(|s| !s.is_empty())?;
                Some(StagedDates::Day(self.zone.day_of(parse_instant(text)?)))
            }
            DateMode::Range => {
                let map = value.as_object()?;
                let from = map.get("from")?.as_text().filter(|s| !s.is_empty())?;
                let to = map.get("to")?.as_text().filter(|s| !s.is_empty())?;
                Some(StagedDates::Range {
                    from: self.zone.day_of(parse_instant(from)?),
                    to: self.zone.day_of(parse_instant(to)?),
                })
            }
        }
    }
}

/// RFC 3339 with milliseconds and a `Z` suffix, the host's canonical
/// instant spelling.
fn to_iso(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(text) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(err) => {
            warn!(%err, value = text, "unparsable committed date, treating as empty");
            None
        }
    }
}

fn format_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

fn parse_day(text: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        Ok(day) => Some(day),
        Err(err) => {
            warn!(%err, value = text, "unparsable staged day, ignoring");
            None
        }
    }
}

impl FieldWidget for DateWidget {
    fn render(
        &mut self,
        schema: &FieldSchema,
        ctx: &BindingContext,
        _env: &mut RenderEnv<'_>,
    ) -> Result<Ui, WidgetError> {
        let display = self.display(ctx);
        let trigger = if display.is_empty() {
            schema.placeholder_text().unwrap_or_default().to_owned()
        } else {
            display
        };

        let (staged, staged_end) = match self.staged {
            Some(StagedDates::Day(day)) => (Some(format_day(day)), None),
            Some(StagedDates::Range { from, to }) => {
                (Some(format_day(from)), Some(format_day(to)))
            }
            None => (None, None),
        };

        let labels = schema.date_options().map(|o| &o.labels);
        let label_or = |configured: Option<&String>, fallback: &str| {
            configured.map_or_else(|| fallback.to_owned(), Clone::clone)
        };

        Ok(Ui::Popover {
            open: self.open,
            trigger,
            body: vec![
                Ui::Calendar {
                    staged,
                    staged_end,
                    range: self.mode == DateMode::Range,
                },
                Ui::Button {
                    label: label_or(labels.and_then(|l| l.reset.as_ref()), "Reset"),
                },
                Ui::Button {
                    label: label_or(labels.and_then(|l| l.close.as_ref()), "Close"),
                },
                Ui::Button {
                    label: label_or(labels.and_then(|l| l.confirm.as_ref()), "Confirm"),
                },
            ],
        })
    }

    fn handle(
        &mut self,
        event: WidgetEvent,
        _schema: &FieldSchema,
        ctx: &mut BindingContext,
        _env: &mut RenderEnv<'_>,
    ) -> Result<(), WidgetError> {
        match event {
            WidgetEvent::OpenPicker => {
                self.open(ctx);
                Ok(())
            }
            WidgetEvent::ClosePicker => {
                self.close();
                Ok(())
            }
            WidgetEvent::StageDay(text) => {
                if let Some(day) = parse_day(&text) {
                    self.stage_day(day)?;
                }
                Ok(())
            }
            WidgetEvent::StageRange { from, to } => {
                if let (Some(from), Some(to)) = (parse_day(&from), parse_day(&to)) {
                    self.stage_range(from, to)?;
                }
                Ok(())
            }
            WidgetEvent::ClearStage => {
                self.clear_stage();
                Ok(())
            }
            WidgetEvent::Confirm => {
                self.confirm(ctx);
                Ok(())
            }
            WidgetEvent::ResetValue => {
                self.reset(ctx);
                Ok(())
            }
            _ => Err(WidgetError::UnsupportedEvent { widget: "date" }),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn riyadh() -> Zone {
        Zone::parse("+03:00").unwrap()
    }

    fn widget(mode: DateMode, zone: Zone) -> DateWidget {
        let mut w = DateWidget::new(mode, None);
        w.zone = zone;
        w
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn zone_parsing() {
        assert_eq!(Zone::parse("UTC"), Some(Zone::Utc));
        assert_eq!(Zone::parse("+03:00"), Some(Zone::Fixed("+03:00".parse().unwrap())));
        assert_eq!(Zone::parse("Mars/Olympus"), None);
        assert_eq!(Zone::resolve(Some("Mars/Olympus")), Zone::Local);
        assert_eq!(Zone::resolve(None), Zone::Local);
    }

    #[test]
    fn confirm_commits_midnight_in_display_zone() {
        let mut w = widget(DateMode::Single, riyadh());
        let mut ctx = BindingContext::new(Value::empty_text(), None);

        w.open(&ctx);
        assert!(w.is_open());
        assert_eq!(w.staged(), None);

        w.stage_day(day("2024-03-10")).unwrap();
        w.confirm(&mut ctx);
        assert!(!w.is_open());

        // Midnight +03:00 is 21:00 the previous day in UTC.
        assert_eq!(
            ctx.take_commit(),
            Some(Value::text("2024-03-09T21:00:00.000Z"))
        );
    }

    #[test]
    fn committed_value_round_trips_to_the_same_displayed_day() {
        let zone = riyadh();
        let mut w = widget(DateMode::Single, zone);
        let mut ctx = BindingContext::new(Value::empty_text(), None);

        w.open(&ctx);
        w.stage_day(day("2024-03-10")).unwrap();
        w.confirm(&mut ctx);
        let iso = ctx.take_commit().unwrap();

        // Reconstruct the closed widget over the committed value.
        let w = widget(DateMode::Single, zone);
        let ctx = BindingContext::new(iso, None);
        assert_eq!(w.display(&ctx), "2024-03-10");
    }

    #[test]
    fn close_discards_staged_edits() {
        let mut w = widget(DateMode::Single, Zone::Utc);
        let committed = Value::text("2024-01-05T00:00:00.000Z");
        let mut ctx = BindingContext::new(committed, None);

        w.open(&ctx);
        w.stage_day(day("2024-02-20")).unwrap();
        w.close();

        assert_eq!(ctx.take_commit(), None);
        // Display falls back to the committed value.
        assert_eq!(w.display(&ctx), "2024-01-05");
    }

    #[test]
    fn reset_commits_empty_and_closes() {
        let mut w = widget(DateMode::Single, Zone::Utc);
        let mut ctx = BindingContext::new(Value::text("2024-01-05T00:00:00.000Z"), None);
        w.open(&ctx);
        w.reset(&mut ctx);

        assert!(!w.is_open());
        assert_eq!(ctx.take_commit(), Some(Value::empty_text()));

        let mut w = widget(DateMode::Range, Zone::Utc);
        let mut ctx = BindingContext::new(Value::Null, None);
        w.open(&ctx);
        w.reset(&mut ctx);
        assert_eq!(
            ctx.take_commit(),
            Some(Value::object_from([
                ("from", Value::empty_text()),
                ("to", Value::empty_text()),
            ]))
        );
    }

    #[test]
    fn confirm_with_empty_stage_commits_explicit_nothing() {
        let mut w = widget(DateMode::Single, Zone::Utc);
        let mut ctx = BindingContext::new(Value::empty_text(), None);
        w.open(&ctx);
        w.confirm(&mut ctx);
        assert_eq!(ctx.take_commit(), Some(Value::Null));

        let mut w = widget(DateMode::Range, Zone::Utc);
        let mut ctx = BindingContext::new(Value::Null, None);
        w.open(&ctx);
        w.confirm(&mut ctx);
        assert_eq!(
            ctx.take_commit(),
            Some(Value::object_from([
                ("from", Value::Null),
                ("to", Value::Null),
            ]))
        );
    }

    #[test]
    fn range_display_joins_with_en_dash() {
        let mut w = widget(DateMode::Range, Zone::Utc);
        let ctx = BindingContext::new(Value::Null, None);
        w.open(&ctx);
        w.stage_range(day("2024-05-01"), day("2024-05-07")).unwrap();
        assert_eq!(w.display(&ctx), "2024-05-01 – 2024-05-07");
    }

    #[test]
    fn range_confirm_commits_both_instants() {
        let mut w = widget(DateMode::Range, riyadh());
        let mut ctx = BindingContext::new(Value::Null, None);
        w.open(&ctx);
        w.stage_range(day("2024-05-01"), day("2024-05-07")).unwrap();
        w.confirm(&mut ctx);
        assert_eq!(
            ctx.take_commit(),
            Some(Value::object_from([
                ("from", Value::text("2024-04-30T21:00:00.000Z")),
                ("to", Value::text("2024-05-06T21:00:00.000Z")),
            ]))
        );
    }

    #[test]
    fn partial_range_reads_as_empty() {
        let w = widget(DateMode::Range, Zone::Utc);
        let ctx = BindingContext::new(
            Value::object_from([
                ("from", Value::text("2024-01-01T00:00:00.000Z")),
                ("to", Value::empty_text()),
            ]),
            None,
        );
        assert_eq!(w.display(&ctx), "");
    }

    #[test]
    fn unparsable_committed_value_reads_as_empty() {
        let w = widget(DateMode::Single, Zone::Utc);
        let ctx = BindingContext::new(Value::text("not-a-date"), None);
        assert_eq!(w.display(&ctx), "");
    }

    #[test]
    fn mode_mismatched_staging_is_rejected() {
        let mut single = widget(DateMode::Single, Zone::Utc);
        let ctx = BindingContext::new(Value::Null, None);
        single.open(&ctx);
        assert!(single.stage_range(day("2024-01-01"), day("2024-01-02")).is_err());

        let mut range = widget(DateMode::Range, Zone::Utc);
        range.open(&ctx);
        assert!(range.stage_day(day("2024-01-01")).is_err());
    }

    #[test]
    fn opening_stages_the_committed_day() {
        let mut w = widget(DateMode::Single, riyadh());
        let ctx = BindingContext::new(Value::text("2024-03-09T21:00:00.000Z"), None);
        w.open(&ctx);
        assert_eq!(w.staged(), Some(StagedDates::Day(day("2024-03-10"))));
    }
}
