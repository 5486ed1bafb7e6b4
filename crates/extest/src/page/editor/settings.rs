//! The settings UI and its typed settings.
//!
//! A setting row is classified by the control it renders, trying
//! [`SETTING_RULES`] in order. A row matching none of them is reported as
//! [`ExtestError::SettingTypeNotSupported`].

use crate::capability::{page_object, HasContextMenu, PageObject};
use crate::driver::Key;
use crate::element::Element;
use crate::page::menu::ContextMenu;
use crate::result::{ExtestError, ExtestResult};
use crate::session::Session;
use crate::wait::{wait_for_stable, WaitOptions};
use async_trait::async_trait;
use tracing::debug;

/// Extras key overriding the pause between search result count reads
pub const SEARCH_DEBOUNCE_EXTRA: &str = "settingsSearchDebounceMs";

/// The settings editor
#[derive(Debug, Clone)]
pub struct SettingsEditor {
    element: Element,
}

/// A setting edited through a dropdown
#[derive(Debug, Clone)]
pub struct ComboSetting {
    element: Element,
}

/// A setting edited through a text field
#[derive(Debug, Clone)]
pub struct TextSetting {
    element: Element,
}

/// A boolean setting
#[derive(Debug, Clone)]
pub struct CheckboxSetting {
    element: Element,
}

/// A setting only editable in settings.json
#[derive(Debug, Clone)]
pub struct LinkSetting {
    element: Element,
}

page_object!(SettingsEditor, ComboSetting, TextSetting, CheckboxSetting, LinkSetting);

/// Control a setting row renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    /// Dropdown
    Combo,
    /// Checkbox
    Checkbox,
    /// Text field
    Text,
    /// "Edit in settings.json" link
    Link,
}

/// Classification rules, tried in order; the first control present wins
pub const SETTING_RULES: &[(&str, SettingKind)] = &[
    ("SettingsEditor.comboSetting", SettingKind::Combo),
    ("SettingsEditor.textSetting", SettingKind::Text),
    ("SettingsEditor.checkboxSetting", SettingKind::Checkbox),
    ("SettingsEditor.linkButton", SettingKind::Link),
];

/// A classified setting
#[derive(Debug, Clone)]
pub enum Setting {
    /// Dropdown
    Combo(ComboSetting),
    /// Checkbox
    Checkbox(CheckboxSetting),
    /// Text field
    Text(TextSetting),
    /// Link to settings.json
    Link(LinkSetting),
}

#[async_trait]
impl HasContextMenu for SettingsEditor {
    async fn open_context_menu(&self) -> ExtestResult<ContextMenu> {
        Err(ExtestError::unsupported("open_context_menu", self.page_name()))
    }
}

impl SettingsEditor {
    pub(crate) const fn new(element: Element) -> Self {
        Self { element }
    }

    /// Search for a setting and classify the row it finds.
    ///
    /// `categories` is the breadcrumb shown before the title, outermost
    /// first, e.g. `["Editor"]` for "Editor: Tab Size".
    pub async fn find_setting(&self, title: &str, categories: &[&str]) -> ExtestResult<Setting> {
        let session = self.session();
        let separator = session.text("SettingsEditor.categorySeparator")?;
        let category = categories.join(separator);

        let search = self
            .element
            .child("SettingsEditor.header")
            .await?
            .child("SettingsEditor.searchBox")
            .await?;
        search
            .send_keys(&Key::chord(&[Key::primary_modifier()], "a"))
            .await?;
        search.send_keys(&Key::Backspace.to_string()).await?;
        search.send_keys(&format!("{category}: {title}")).await?;

        let count = self.settled_result_count().await?;
        debug!(title, %category, %count, "Settings search settled");

        let row = self
            .element
            .child_with("SettingsEditor.settingConstructor", &[title, &category])
            .await?;
        Setting::classify(row, title).await
    }

    /// Result count text once two consecutive reads agree
    async fn settled_result_count(&self) -> ExtestResult<String> {
        let session = self.session();
        let options = WaitOptions::new()
            .with_timeout(session.timeouts().element_ms)
            .with_poll_interval(search_debounce_ms(session));
        let header = self.element.child("SettingsEditor.header").await?;
        wait_for_stable(&options, "settings search to settle", || async {
            match header.children("SettingsEditor.itemCount").await?.into_iter().next() {
                Some(count) => count.text().await,
                None => Ok(String::new()),
            }
        })
        .await
    }
}

/// Debounce carried by the locator extras, else the settle pause
fn search_debounce_ms(session: &Session) -> u64 {
    session
        .extra(SEARCH_DEBOUNCE_EXTRA)
        .and_then(serde_json::Value::as_u64)
        .unwrap_or(session.timeouts().settle_ms)
}

impl Setting {
    /// Classify a setting row
    pub async fn classify(element: Element, title: &str) -> ExtestResult<Self> {
        for (marker, kind) in SETTING_RULES {
            if !element.has_child(marker).await? {
                continue;
            }
            let element = element.clone();
            return Ok(match kind {
                SettingKind::Combo => Self::Combo(ComboSetting { element }),
                SettingKind::Checkbox => Self::Checkbox(CheckboxSetting { element }),
                SettingKind::Text => Self::Text(TextSetting { element }),
                SettingKind::Link => Self::Link(LinkSetting { element }),
            });
        }
        Err(ExtestError::SettingTypeNotSupported {
            title: title.to_string(),
        })
    }

    /// Which rule matched
    #[must_use]
    pub const fn kind(&self) -> SettingKind {
        match self {
            Self::Combo(_) => SettingKind::Combo,
            Self::Checkbox(_) => SettingKind::Checkbox,
            Self::Text(_) => SettingKind::Text,
            Self::Link(_) => SettingKind::Link,
        }
    }

    fn row(&self) -> &Element {
        match self {
            Self::Combo(s) => &s.element,
            Self::Checkbox(s) => &s.element,
            Self::Text(s) => &s.element,
            Self::Link(s) => &s.element,
        }
    }

    /// Setting title
    pub async fn title(&self) -> ExtestResult<String> {
        self.row().child("SettingsEditor.settingTitle").await?.text().await
    }

    /// Category breadcrumb without the trailing colon
    pub async fn category(&self) -> ExtestResult<String> {
        let text = self.row().child("SettingsEditor.settingCategory").await?.text().await?;
        Ok(text.trim_end().trim_end_matches(':').to_string())
    }

    /// Description under the title
    pub async fn description(&self) -> ExtestResult<String> {
        self.row().child("SettingsEditor.settingDescription").await?.text().await
    }
}

impl ComboSetting {
    async fn select(&self) -> ExtestResult<Element> {
        self.element.child("SettingsEditor.comboSetting").await
    }

    /// Selected value
    pub async fn value(&self) -> ExtestResult<String> {
        Ok(self
            .select()
            .await?
            .attribute_at("SettingsEditor.comboValue")
            .await?
            .unwrap_or_default())
    }

    /// Every value the dropdown offers
    pub async fn values(&self) -> ExtestResult<Vec<String>> {
        let mut values = Vec::new();
        for option in self.select().await?.children("SettingsEditor.comboOption").await? {
            values.push(option.text().await?);
        }
        Ok(values)
    }

    /// Pick a value
    pub async fn set_value(&self, value: &str) -> ExtestResult<()> {
        let select = self.select().await?;
        for option in select.children("SettingsEditor.comboOption").await? {
            if option.text().await? == value {
                select.click().await?;
                return option.click().await;
            }
        }
        Err(ExtestError::not_found(value))
    }
}

impl TextSetting {
    async fn input(&self) -> ExtestResult<Element> {
        self.element.child("SettingsEditor.textSetting").await
    }

    /// Current text
    pub async fn value(&self) -> ExtestResult<String> {
        Ok(self
            .input()
            .await?
            .attribute_at("SettingsEditor.textValue")
            .await?
            .unwrap_or_default())
    }

    /// Replace the text
    pub async fn set_value(&self, value: &str) -> ExtestResult<()> {
        let input = self.input().await?;
        input.clear().await?;
        input.send_keys(value).await
    }
}

impl CheckboxSetting {
    async fn checkbox(&self) -> ExtestResult<Element> {
        self.element.child("SettingsEditor.checkboxSetting").await
    }

    /// Whether the box is ticked
    pub async fn value(&self) -> ExtestResult<bool> {
        let checked = self
            .checkbox()
            .await?
            .attribute_at("SettingsEditor.checkboxChecked")
            .await?;
        Ok(checked.as_deref() == Some("true"))
    }

    /// Tick or untick the box
    pub async fn set_value(&self, value: bool) -> ExtestResult<()> {
        if self.value().await? != value {
            self.checkbox().await?.click().await?;
        }
        Ok(())
    }
}

impl LinkSetting {
    /// Open settings.json at this setting
    pub async fn open_json(&self) -> ExtestResult<()> {
        self.element.child("SettingsEditor.linkButton").await?.click().await
    }
}
