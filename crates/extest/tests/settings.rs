//! Settings editor: editor classification, setting search and the typed
//! setting rows.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::unreachable)]

mod common;

use common::session;
use extest::mock::{MockDriver, NodeId};
use extest::page::{EditorKind, EditorView, Setting, SettingKind, SettingsEditor, Workbench};
use extest::prelude::*;
use extest::MockNode;

struct SettingsFixture {
    instance: NodeId,
    search: NodeId,
}

/// Editor area showing the settings UI; the instance also carries a text
/// editor so classification order matters
fn settings_fixture(driver: &MockDriver) -> SettingsFixture {
    driver.dom(|dom| {
        let workbench = dom.add_root(MockNode::new("div").class("monaco-workbench"));
        let editor_part = dom.add(workbench, MockNode::new("div").id("workbench.parts.editor"));
        let group = dom.add(editor_part, MockNode::new("div").class("editor-group-container"));
        let tab = dom.add(
            group,
            MockNode::new("div")
                .class("tab")
                .attr("role", "tab")
                .attr("aria-label", "Settings")
                .attr("aria-selected", "true"),
        );
        dom.add(tab, MockNode::new("span").class("label-name").text("Settings"));
        let instance = dom.add(group, MockNode::new("div").class("editor-instance"));
        dom.add(instance, MockNode::new("div").class("monaco-editor"));
        dom.add(instance, MockNode::new("div").class("settings-editor"));
        let header = dom.add(instance, MockNode::new("div").class("settings-header"));
        let search = dom.add(header, MockNode::new("textarea").class("inputarea"));
        dom.add(
            header,
            MockNode::new("div")
                .class("settings-count-widget")
                .text("1 Setting Found"),
        );
        SettingsFixture { instance, search }
    })
}

/// Setting row answering the row template for `title` under `category`
fn add_setting_row(
    driver: &MockDriver,
    session: &Session,
    fixture: &SettingsFixture,
    title: &str,
    category: &str,
) -> NodeId {
    let selector = session
        .build("SettingsEditor.settingConstructor", &[title, category])
        .unwrap();
    let category_text = format!("{category}: ");
    driver.dom(|dom| {
        let row = dom.add(
            fixture.instance,
            MockNode::new("div")
                .class("setting-item-contents")
                .answers(selector),
        );
        dom.add(row, MockNode::new("span").class("setting-item-category").text(category_text));
        dom.add(row, MockNode::new("span").class("setting-item-label").text(title));
        dom.add(
            row,
            MockNode::new("div")
                .class("setting-item-description")
                .text(format!("Controls {title}.")),
        );
        row
    })
}

async fn settings_editor(session: &Session) -> SettingsEditor {
    let editor = EditorView::new(session).await.unwrap().active_editor().await.unwrap();
    assert_eq!(editor.kind(), EditorKind::Settings);
    editor.into_settings().unwrap()
}

// ============================================================================
// Classification
// ============================================================================

#[tokio::test]
async fn test_settings_marker_wins_over_text_marker() {
    let (driver, session) = session("1.37.0");
    let fixture = settings_fixture(&driver);

    let view = EditorView::new(&session).await.unwrap();
    assert_eq!(view.active_editor().await.unwrap().kind(), EditorKind::Settings);

    driver.dom(|dom| {
        let settings = dom.children(fixture.instance)[1];
        dom.remove(settings);
    });
    assert_eq!(view.active_editor().await.unwrap().kind(), EditorKind::Text);
}

#[tokio::test]
async fn test_settings_editor_has_no_context_menu() {
    let (driver, session) = session("1.37.0");
    settings_fixture(&driver);

    let editor = settings_editor(&session).await;
    let err = editor.open_context_menu().await.unwrap_err();
    assert!(matches!(err, ExtestError::Unsupported { ref target, .. } if target == "SettingsEditor"));
    assert!(!driver.was_called("context_click"));
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test]
async fn test_find_text_setting_and_edit_it() {
    let (driver, session) = session("1.37.0");
    let fixture = settings_fixture(&driver);
    let row = add_setting_row(&driver, &session, &fixture, "Tab Size", "Editor");
    driver.dom(|dom| {
        dom.add(row, MockNode::new("input").attr("value", "4"));
    });

    let editor = settings_editor(&session).await;
    let setting = editor.find_setting("Tab Size", &["Editor"]).await.unwrap();
    assert_eq!(setting.kind(), SettingKind::Text);
    assert_eq!(setting.title().await.unwrap(), "Tab Size");
    assert_eq!(setting.category().await.unwrap(), "Editor");
    assert_eq!(setting.description().await.unwrap(), "Controls Tab Size.");

    let search = format!("send_keys:{}:Editor: Tab Size", driver.handle(fixture.search).id);
    assert!(driver.history().contains(&search));

    let Setting::Text(text) = setting else {
        unreachable!("classified as text above");
    };
    assert_eq!(text.value().await.unwrap(), "4");
    text.set_value("8").await.unwrap();
    assert_eq!(text.value().await.unwrap(), "8");
}

#[tokio::test]
async fn test_nested_categories_join_with_separator() {
    let (driver, session) = session("1.37.0");
    let fixture = settings_fixture(&driver);
    let separator = session.text("SettingsEditor.categorySeparator").unwrap().to_string();
    let category = format!("Editor{separator}Font");
    let row = add_setting_row(&driver, &session, &fixture, "Size", &category);
    driver.dom(|dom| {
        dom.add(row, MockNode::new("input").attr("value", "14"));
    });

    let editor = settings_editor(&session).await;
    let setting = editor.find_setting("Size", &["Editor", "Font"]).await.unwrap();
    assert_eq!(setting.category().await.unwrap(), category);
}

#[tokio::test]
async fn test_missing_setting_is_not_found() {
    let (driver, session) = session("1.37.0");
    settings_fixture(&driver);

    let editor = settings_editor(&session).await;
    let err = editor.find_setting("Nope", &["Editor"]).await.unwrap_err();
    assert!(matches!(err, ExtestError::ElementNotFound { .. }));
}

// ============================================================================
// Setting kinds
// ============================================================================

#[tokio::test]
async fn test_combo_rule_precedes_text_rule() {
    let (driver, session) = session("1.37.0");
    let fixture = settings_fixture(&driver);
    let row = add_setting_row(&driver, &session, &fixture, "Word Wrap", "Editor");
    driver.dom(|dom| {
        let select = dom.add(row, MockNode::new("select").attr("title", "off"));
        for value in ["off", "on", "bounded"] {
            dom.add(select, MockNode::new("option").text(value));
        }
        dom.add(row, MockNode::new("input"));
    });

    let editor = settings_editor(&session).await;
    let Setting::Combo(combo) = editor.find_setting("Word Wrap", &["Editor"]).await.unwrap() else {
        unreachable!("dropdown rows classify as combo");
    };
    assert_eq!(combo.value().await.unwrap(), "off");
    assert_eq!(combo.values().await.unwrap(), ["off", "on", "bounded"]);

    combo.set_value("on").await.unwrap();
    assert_eq!(driver.call_count("click"), 2);
    let err = combo.set_value("sometimes").await.unwrap_err();
    assert!(matches!(err, ExtestError::ItemNotFound { .. }));
}

#[tokio::test]
async fn test_text_rule_precedes_checkbox_rule() {
    let (driver, session) = session("1.37.0");
    let fixture = settings_fixture(&driver);
    let row = add_setting_row(&driver, &session, &fixture, "Exclude", "Files");
    driver.dom(|dom| {
        dom.add(row, MockNode::new("div").class("setting-value-checkbox"));
        dom.add(row, MockNode::new("input").attr("value", "**/.git"));
    });

    let editor = settings_editor(&session).await;
    let setting = editor.find_setting("Exclude", &["Files"]).await.unwrap();
    assert_eq!(setting.kind(), SettingKind::Text);
}

#[tokio::test]
async fn test_checkbox_clicks_only_on_change() {
    let (driver, session) = session("1.37.0");
    let fixture = settings_fixture(&driver);
    let row = add_setting_row(&driver, &session, &fixture, "Minimap", "Editor");
    driver.dom(|dom| {
        let checkbox = dom.add(
            row,
            MockNode::new("div")
                .class("setting-value-checkbox")
                .attr("aria-checked", "false"),
        );
        dom.on_click(checkbox, move |dom| dom.set_attribute(checkbox, "aria-checked", "true"));
    });

    let editor = settings_editor(&session).await;
    let Setting::Checkbox(checkbox) = editor.find_setting("Minimap", &["Editor"]).await.unwrap() else {
        unreachable!("checkbox rows classify as checkbox");
    };
    assert!(!checkbox.value().await.unwrap());
    checkbox.set_value(true).await.unwrap();
    checkbox.set_value(true).await.unwrap();
    assert!(checkbox.value().await.unwrap());
    assert_eq!(driver.call_count("click"), 1);
}

#[tokio::test]
async fn test_link_setting_opens_json() {
    let (driver, session) = session("1.37.0");
    let fixture = settings_fixture(&driver);
    let row = add_setting_row(&driver, &session, &fixture, "Rulers", "Editor");
    let link = driver.dom(|dom| {
        dom.add(row, MockNode::new("a").class("edit-in-settings-button"))
    });

    let editor = settings_editor(&session).await;
    let Setting::Link(setting) = editor.find_setting("Rulers", &["Editor"]).await.unwrap() else {
        unreachable!("link rows classify as link");
    };
    setting.open_json().await.unwrap();
    assert!(driver.was_called(&format!("click:{}", driver.handle(link).id)));
}

#[tokio::test]
async fn test_unknown_control_is_unsupported() {
    let (driver, session) = session("1.37.0");
    let fixture = settings_fixture(&driver);
    add_setting_row(&driver, &session, &fixture, "Color Theme", "Workbench");

    let editor = settings_editor(&session).await;
    let err = editor.find_setting("Color Theme", &["Workbench"]).await.unwrap_err();
    assert!(matches!(err, ExtestError::SettingTypeNotSupported { ref title } if title == "Color Theme"));
}

// ============================================================================
// Opening through the command palette
// ============================================================================

#[tokio::test]
async fn test_open_settings_waits_for_settings_tab() {
    let (driver, session) = session("1.37.0");
    driver.dom(|dom| {
        let workbench = dom.add_root(MockNode::new("div").class("monaco-workbench"));
        let editor_part = dom.add(workbench, MockNode::new("div").id("workbench.parts.editor"));
        let group = dom.add(editor_part, MockNode::new("div").class("editor-group-container"));
        let widget = dom.add(
            workbench,
            MockNode::new("div").class("monaco-quick-open-widget").hidden(),
        );
        dom.add(widget, MockNode::new("input").class("input"));
        dom.on_keys(move |dom, _, keys| {
            if keys.contains(Key::F1.code_point()) {
                dom.set_displayed(widget, true);
            }
            if keys.contains(Key::Enter.code_point()) {
                dom.set_displayed(widget, false);
                let tab = dom.add(
                    group,
                    MockNode::new("div")
                        .class("tab")
                        .attr("role", "tab")
                        .attr("aria-selected", "true"),
                );
                dom.add(tab, MockNode::new("span").class("label-name").text("Settings"));
                let instance = dom.add(group, MockNode::new("div").class("editor-instance"));
                dom.add(instance, MockNode::new("div").class("settings-editor"));
            }
        });
    });

    let workbench = Workbench::new(&session).await.unwrap();
    workbench.open_settings().await.unwrap();
    assert!(driver
        .history()
        .iter()
        .any(|call| call.ends_with(":>open user settings")));
}
