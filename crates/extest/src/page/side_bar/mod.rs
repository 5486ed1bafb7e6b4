//! Side bar: the view title, the content area and its collapsible sections.
//!
//! [`ViewContent::sections`] classifies each section by the marker element its
//! body renders, trying the rules in [`SECTION_RULES`] in order and falling
//! back to a custom tree.

mod breakpoints;
mod extensions;
mod scm;
mod tree;
mod welcome;

pub use breakpoints::{BreakpointSectionItem, DebugBreakpointSection};
pub use extensions::{ExtensionsViewItem, ExtensionsViewSection};
pub use scm::{ScmChange, ScmProvider, ScmView};
pub use tree::{CustomTreeItem, CustomTreeSection, DefaultTreeItem, DefaultTreeSection};
pub use welcome::{WelcomeContentButton, WelcomeContentSection};

use crate::capability::{page_object, HasContextMenu, PageObject};
use crate::element::Element;
use crate::result::ExtestResult;
use crate::rows::TreeSection;
use crate::session::Session;
use crate::wait::wait_until;

/// The side bar container
#[derive(Debug, Clone)]
pub struct SideBarView {
    element: Element,
}

/// Title strip of the side bar
#[derive(Debug, Clone)]
pub struct ViewTitlePart {
    element: Element,
}

/// Action button in the side bar title strip
#[derive(Debug, Clone)]
pub struct ViewTitleAction {
    element: Element,
}

/// Content area holding the sections
#[derive(Debug, Clone)]
pub struct ViewContent {
    element: Element,
}

/// A collapsible section of the side bar
#[derive(Debug, Clone)]
pub struct ViewSection {
    element: Element,
}

/// Action button in a section header
#[derive(Debug, Clone)]
pub struct ViewPanelAction {
    element: Element,
}

/// Inline action button on a tree row
#[derive(Debug, Clone)]
pub struct ViewItemAction {
    element: Element,
}

page_object!(
    SideBarView,
    ViewTitlePart,
    ViewTitleAction,
    ViewContent,
    ViewSection,
    ViewPanelAction,
    ViewItemAction,
);

impl HasContextMenu for SideBarView {}
impl HasContextMenu for ViewSection {}

impl SideBarView {
    /// Locate the side bar
    pub async fn new(session: &Session) -> ExtestResult<Self> {
        Ok(Self {
            element: session.find("SideBarView.constructor").await?,
        })
    }

    /// The title strip
    pub async fn title_part(&self) -> ExtestResult<ViewTitlePart> {
        Ok(ViewTitlePart {
            element: self.element.child("ViewTitlePart.constructor").await?,
        })
    }

    /// The content area
    pub async fn content(&self) -> ExtestResult<ViewContent> {
        Ok(ViewContent {
            element: self.element.child("ViewContent.constructor").await?,
        })
    }
}

impl ViewTitlePart {
    /// Title of the open view
    pub async fn title(&self) -> ExtestResult<String> {
        self.element.child("ViewTitlePart.title").await?.text().await
    }

    /// Action buttons in display order
    pub async fn actions(&self) -> ExtestResult<Vec<ViewTitleAction>> {
        let mut actions = Vec::new();
        for item in self.element.children("ViewTitlePart.action").await? {
            if let Some(label) = item.children("ViewTitlePart.actionLabel").await?.into_iter().next() {
                actions.push(ViewTitleAction { element: label });
            }
        }
        Ok(actions)
    }

    /// The action button with this title
    pub async fn action(&self, title: &str) -> ExtestResult<Option<ViewTitleAction>> {
        let found = self
            .element
            .children_with("ViewTitlePart.actionConstructor", &[title])
            .await?;
        Ok(found.into_iter().next().map(|element| ViewTitleAction { element }))
    }
}

impl ViewTitleAction {
    /// Button title
    pub async fn title(&self) -> ExtestResult<String> {
        Ok(self
            .element
            .attribute_at("ViewTitlePart.actionTitle")
            .await?
            .unwrap_or_default())
    }

    /// Click the button
    pub async fn click(&self) -> ExtestResult<()> {
        self.element.click().await
    }
}

/// Shape of a side bar section, decided by the marker its body renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// The file explorer tree
    Default,
    /// The extensions list
    Extensions,
    /// The debug breakpoints list
    Breakpoints,
    /// Any tree contributed by an extension
    Custom,
}

/// Classification rules, tried in order; the first marker present wins
pub const SECTION_RULES: &[(&str, SectionKind)] = &[
    ("ViewContent.defaultView", SectionKind::Default),
    ("ViewContent.extensionsView", SectionKind::Extensions),
    ("ViewContent.breakpointsView", SectionKind::Breakpoints),
];

/// A classified side bar section
#[derive(Debug, Clone)]
pub enum Section {
    /// File explorer
    Default(DefaultTreeSection),
    /// Extension-contributed tree
    Custom(CustomTreeSection),
    /// Extensions list
    Extensions(ExtensionsViewSection),
    /// Breakpoints list
    Breakpoints(DebugBreakpointSection),
}

impl Section {
    /// Classify a section element
    pub async fn classify(section: ViewSection) -> ExtestResult<Self> {
        let mut kind = SectionKind::Custom;
        for (marker, candidate) in SECTION_RULES {
            if section.element.has_child(marker).await? {
                kind = *candidate;
                break;
            }
        }
        Ok(match kind {
            SectionKind::Default => Self::Default(DefaultTreeSection::new(section)),
            SectionKind::Extensions => Self::Extensions(ExtensionsViewSection::new(section)),
            SectionKind::Breakpoints => Self::Breakpoints(DebugBreakpointSection::new(section)),
            SectionKind::Custom => Self::Custom(CustomTreeSection::new(section)),
        })
    }

    /// Which rule matched
    #[must_use]
    pub const fn kind(&self) -> SectionKind {
        match self {
            Self::Default(_) => SectionKind::Default,
            Self::Custom(_) => SectionKind::Custom,
            Self::Extensions(_) => SectionKind::Extensions,
            Self::Breakpoints(_) => SectionKind::Breakpoints,
        }
    }

    /// Header and body shared by every kind
    #[must_use]
    pub fn view_section(&self) -> &ViewSection {
        match self {
            Self::Default(s) => s.section(),
            Self::Custom(s) => s.section(),
            Self::Extensions(s) => s.section(),
            Self::Breakpoints(s) => s.section(),
        }
    }
}

impl ViewContent {
    /// Whether the content area shows a running progress bar
    pub async fn has_progress(&self) -> ExtestResult<bool> {
        let Some(progress) = self.element.children("ViewContent.progress").await?.into_iter().next()
        else {
            return Ok(false);
        };
        progress.has_class_at("ViewContent.progressActive").await
    }

    /// Every section, classified
    pub async fn sections(&self) -> ExtestResult<Vec<Section>> {
        let mut sections = Vec::new();
        for element in self.element.children("ViewContent.section").await? {
            sections.push(Section::classify(ViewSection::new(element)).await?);
        }
        Ok(sections)
    }

    /// The section with this title
    pub async fn section(&self, title: &str) -> ExtestResult<Option<Section>> {
        for element in self.element.children("ViewContent.section").await? {
            let section = ViewSection::new(element);
            if section.title().await? == title {
                return Ok(Some(Section::classify(section).await?));
            }
        }
        Ok(None)
    }
}

impl ViewSection {
    /// Wrap a section element
    #[must_use]
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    async fn header(&self) -> ExtestResult<Element> {
        self.element.child("ViewSection.header").await
    }

    /// Section title
    pub async fn title(&self) -> ExtestResult<String> {
        let title = self.header().await?.child("ViewSection.title").await?;
        match title.attribute_at("ViewSection.titleAttribute").await? {
            Some(text) if !text.is_empty() => Ok(text),
            _ => title.text().await,
        }
    }

    /// Whether the body is shown
    pub async fn is_expanded(&self) -> ExtestResult<bool> {
        let header = self.header().await?;
        Ok(header.attribute_at("ViewSection.headerExpanded").await?.as_deref() == Some("true"))
    }

    /// Show the body
    pub async fn expand(&self) -> ExtestResult<()> {
        self.toggle_to(true).await
    }

    /// Hide the body
    pub async fn collapse(&self) -> ExtestResult<()> {
        self.toggle_to(false).await
    }

    async fn toggle_to(&self, expanded: bool) -> ExtestResult<()> {
        if self.is_expanded().await? == expanded {
            return Ok(());
        }
        self.header().await?.click().await?;
        let options = self.session().wait_options(None);
        let wanted = if expanded { "section to expand" } else { "section to collapse" };
        wait_until(&options, wanted, || async {
            Ok((self.is_expanded().await? == expanded).then_some(()))
        })
        .await
    }

    /// Header action buttons, revealed by hovering the header
    pub async fn actions(&self) -> ExtestResult<Vec<ViewPanelAction>> {
        let header = self.header().await?;
        header.hover().await?;
        let Some(container) = header.children("ViewSection.actions").await?.into_iter().next() else {
            return Ok(Vec::new());
        };
        Ok(container
            .children("ViewSection.button")
            .await?
            .into_iter()
            .map(|element| ViewPanelAction { element })
            .collect())
    }

    /// The header action with this label
    pub async fn action(&self, label: &str) -> ExtestResult<Option<ViewPanelAction>> {
        for action in self.actions().await? {
            if action.label().await? == label {
                return Ok(Some(action));
            }
        }
        Ok(None)
    }

    /// Welcome content shown instead of a tree, if any
    pub async fn welcome_content(&self) -> ExtestResult<Option<WelcomeContentSection>> {
        Ok(self
            .element
            .children("WelcomeContent.constructor")
            .await?
            .into_iter()
            .next()
            .map(WelcomeContentSection::new))
    }
}

impl ViewPanelAction {
    /// Button label
    pub async fn label(&self) -> ExtestResult<String> {
        Ok(self
            .element
            .attribute_at("ViewSection.buttonLabel")
            .await?
            .unwrap_or_default())
    }

    /// Click the button
    pub async fn click(&self) -> ExtestResult<()> {
        self.element.click().await
    }
}

impl ViewItemAction {
    /// Wrap an action label element
    #[must_use]
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    /// Button title
    pub async fn title(&self) -> ExtestResult<String> {
        Ok(self
            .element
            .attribute_at("TreeItem.actionTitle")
            .await?
            .unwrap_or_default())
    }

    /// Click the button
    pub async fn click(&self) -> ExtestResult<()> {
        self.element.click().await
    }
}
