//! End-to-end login flow against the in-memory driver.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use screen_objects::{
    By, Element, HarnessOptions, Locator, MockDriver, MockElement, Session, StepStatus, TestData,
    screen,
};

screen! {
    /// Login screen.
    pub struct LoginScreen {
        btn_sign_in => Locator::accessibility("SIGN IN", "Sign In button"),
        txt_username => Locator::xpath(
            "//android.widget.EditText[@resource-id='input28']",
            "Username textfield",
        ),
        btn_next => Locator::xpath("//android.widget.Button[@text='Next']", "Next button"),
        txt_password => Locator::xpath(
            "//android.widget.EditText[@resource-id='input61']",
            "Password textfield",
        ),
        btn_verify => Locator::xpath("//android.widget.Button[@text='Verify']", "Verify button"),
    }
}

screen! {
    /// Landing screen after login.
    pub struct LandingScreen {
        hdr_whats_new => Locator::accessibility("What's New", "What's New header"),
        lnk_logout => Locator::accessibility("Logout", "Logout link"),
    }
}

const CREDENTIALS: &str = r#"{
    "US": { "Agent": { "username": "agent01", "password": "UEBzc3cwcmQ=" } }
}"#;

fn device() -> MockDriver {
    let driver = MockDriver::new();
    driver.place(By::accessibility_id("SIGN IN"), MockElement::new());
    driver.place(
        By::xpath("//android.widget.EditText[@resource-id='input28']"),
        MockElement::new(),
    );
    driver.place(By::xpath("//android.widget.Button[@text='Next']"), MockElement::new());
    driver.place(
        By::xpath("//android.widget.EditText[@resource-id='input61']"),
        MockElement::new(),
    );
    driver.place(By::xpath("//android.widget.Button[@text='Verify']"), MockElement::new());
    driver.place(
        By::accessibility_id("What's New"),
        MockElement::new().with_attribute("content-desc", "What's New"),
    );
    driver.place(By::accessibility_id("Logout"), MockElement::new());
    driver
}

fn fast_options() -> HarnessOptions {
    HarnessOptions::new()
        .with_small_wait(Duration::from_millis(100))
        .with_element_load_wait(Duration::from_millis(100))
        .with_poll_interval(Duration::from_millis(10))
}

#[tokio::test]
async fn test_login_and_logout() -> Result<()> {
    let driver = device();
    let session = Session::with_options(Arc::new(driver.clone()), fast_options())?;
    let data = TestData::from_json_str(CREDENTIALS)?;

    let mut login = LoginScreen::new();
    let mut landing = LandingScreen::new();
    assert!(session.init(&mut login).is_complete());
    assert!(session.init(&mut landing).is_complete());
    assert_eq!(driver.total_lookups(), 0);

    let actions = session.actions();
    actions.tap(login.btn_sign_in()?).await?;
    actions
        .write(login.txt_username()?, data.get(&["US", "Agent", "username"])?)
        .await?;
    actions.tap(login.btn_next()?).await?;
    actions
        .write_secret(login.txt_password()?, data.get(&["US", "Agent", "password"])?)
        .await?;
    actions.tap(login.btn_verify()?).await?;
    assert!(
        actions
            .assert_element_text(landing.hdr_whats_new()?, "What's New")
            .await
    );
    actions.tap(landing.lnk_logout()?).await?;

    let password = driver
        .element(&By::xpath("//android.widget.EditText[@resource-id='input61']"))
        .expect("password field placed");
    assert_eq!(password.typed(), vec!["P@ssw0rd".to_string()]);

    let steps = session.steps().steps();
    assert!(steps.iter().all(|s| s.status == StepStatus::Pass));
    assert!(steps.iter().any(|s| s.message == "Entered ***** in 'Password textfield'"));
    assert_eq!(session.narration().alias(), "'Logout link'");
    session.finish()?;
    Ok(())
}

#[tokio::test]
async fn test_handles_follow_rebuilt_screen() -> Result<()> {
    let driver = device();
    let session = Session::with_options(Arc::new(driver.clone()), fast_options())?;
    let mut login = LoginScreen::new();
    session.init(&mut login);

    let first = login.btn_sign_in()?.resolve().await?;

    // The tree is rebuilt after navigation; the old node goes stale.
    let rebuilt = driver.place(By::accessibility_id("SIGN IN"), MockElement::new());
    assert!(first.click().await.is_err());

    session.actions().tap(login.btn_sign_in()?).await?;
    assert_eq!(rebuilt.clicks(), 1);
    Ok(())
}

#[tokio::test]
async fn test_missing_element_is_narrated() -> Result<()> {
    let driver = device();
    driver.remove(&By::accessibility_id("Logout"));
    let session = Session::with_options(Arc::new(driver), fast_options())?;
    let mut landing = LandingScreen::new();
    session.init(&mut landing);

    let err = session
        .actions()
        .tap(landing.lnk_logout()?)
        .await
        .unwrap_err();
    assert!(err.is_timeout());

    let failed = session.steps().steps().pop().expect("a failed step");
    assert_eq!(failed.status, StepStatus::Fail);
    assert_eq!(
        failed.message,
        "Cannot find 'Logout link' | Locator: accessibility-tag(\"Logout\")"
    );
    assert!(session.finish().is_ok());
    Ok(())
}

#[tokio::test]
async fn test_two_sessions_do_not_share_narration() -> Result<()> {
    let first = Session::new(Arc::new(device()));
    let second = Session::new(Arc::new(device()));
    let mut first_login = LoginScreen::new();
    let mut second_landing = LandingScreen::new();
    first.init(&mut first_login);
    second.init(&mut second_landing);

    let sign_in = first_login.btn_sign_in()?;
    let logout = second_landing.lnk_logout()?;
    let (a, b) = tokio::join!(sign_in.click(), logout.click());
    a?;
    b?;

    assert_eq!(first.narration().alias(), "'Sign In button'");
    assert_eq!(second.narration().alias(), "'Logout link'");
    Ok(())
}
