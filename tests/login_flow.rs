//! End-to-end session protocol tests against a local mock gateway.

use proxylogin::{HttpGateway, Outcome, ProxySession};

const LOGIN_PAGE: &str = concat!(
    "<html><body><form method=\"post\">",
    "<input name=\"sessionid\" type=\"hidden\" value=\"ABCDEFGHIJ123456\">",
    "</form></body></html>"
);

fn gateway_for(server: &mockito::ServerGuard) -> HttpGateway {
    HttpGateway::new(format!("{}/cgi-bin/proxy.cgi", server.url()), false).unwrap()
}

#[test]
fn successful_login_round_trip() {
    let mut server = mockito::Server::new();

    // One page fetch when the session opens, one more before the login form
    // is submitted.
    let page = server
        .mock("GET", "/cgi-bin/proxy.cgi")
        .with_body(LOGIN_PAGE)
        .expect(2)
        .create();
    let submit = server
        .mock("POST", "/cgi-bin/proxy.cgi")
        .with_body("<html>You are logged in successfully as alice</html>")
        .create();

    let mut session = ProxySession::open("alice", "hunter2", Box::new(gateway_for(&server)))
        .expect("session should open against the mock gateway");
    assert_eq!(session.login().unwrap(), Outcome::Success);

    page.assert();
    submit.assert();
}

#[test]
fn login_form_carries_token_action_and_credentials() {
    let mut server = mockito::Server::new();

    server
        .mock("GET", "/cgi-bin/proxy.cgi")
        .with_body(LOGIN_PAGE)
        .expect(2)
        .create();
    let submit = server
        .mock("POST", "/cgi-bin/proxy.cgi")
        .match_body(mockito::Matcher::AllOf(vec![
            mockito::Matcher::UrlEncoded("sessionid".into(), "ABCDEFGHIJ123456".into()),
            mockito::Matcher::UrlEncoded("action".into(), "Validate".into()),
            mockito::Matcher::UrlEncoded("userid".into(), "alice".into()),
            mockito::Matcher::UrlEncoded("pass".into(), "hunter2".into()),
        ]))
        .with_body("You are logged in successfully as alice")
        .create();

    let mut session =
        ProxySession::open("alice", "hunter2", Box::new(gateway_for(&server))).unwrap();
    assert_eq!(session.login().unwrap(), Outcome::Success);
    submit.assert();
}

#[test]
fn rejected_credentials_are_reported_not_raised() {
    let mut server = mockito::Server::new();

    server
        .mock("GET", "/cgi-bin/proxy.cgi")
        .with_body(LOGIN_PAGE)
        .expect(2)
        .create();
    server
        .mock("POST", "/cgi-bin/proxy.cgi")
        .with_body("Either your userid and/or password does'not match.")
        .create();

    let mut session =
        ProxySession::open("alice", "wrong", Box::new(gateway_for(&server))).unwrap();
    assert_eq!(session.login().unwrap(), Outcome::IncorrectCredentials);
}

#[test]
fn logout_round_trip() {
    let mut server = mockito::Server::new();

    server
        .mock("GET", "/cgi-bin/proxy.cgi")
        .with_body(LOGIN_PAGE)
        .expect(2)
        .create();
    server
        .mock("POST", "/cgi-bin/proxy.cgi")
        .match_body(mockito::Matcher::UrlEncoded("action".into(), "logout".into()))
        .with_body("you have logged out from the IIT Delhi Proxy Service")
        .create();

    let mut session =
        ProxySession::open("alice", "hunter2", Box::new(gateway_for(&server))).unwrap();
    assert_eq!(session.logout().unwrap(), Outcome::Success);
}

#[test]
fn refresh_reuses_the_current_token_without_a_page_fetch() {
    let mut server = mockito::Server::new();

    // Exactly one fetch: the one that opened the session.
    let page = server
        .mock("GET", "/cgi-bin/proxy.cgi")
        .with_body(LOGIN_PAGE)
        .expect(1)
        .create();
    server
        .mock("POST", "/cgi-bin/proxy.cgi")
        .match_body(mockito::Matcher::AllOf(vec![
            mockito::Matcher::UrlEncoded("sessionid".into(), "ABCDEFGHIJ123456".into()),
            mockito::Matcher::UrlEncoded("action".into(), "Refresh".into()),
        ]))
        .with_body("<html>something unrecognizable</html>")
        .create();

    let mut session =
        ProxySession::open("alice", "hunter2", Box::new(gateway_for(&server))).unwrap();
    assert_eq!(session.refresh().unwrap(), Outcome::NotConnected);
    page.assert();
}

#[test]
fn tokenless_page_fails_the_session_open() {
    let mut server = mockito::Server::new();

    server
        .mock("GET", "/cgi-bin/proxy.cgi")
        .with_body("<html>under maintenance</html>")
        .create();

    let err = ProxySession::open("alice", "hunter2", Box::new(gateway_for(&server)))
        .unwrap_err();
    assert!(matches!(err, proxylogin::SessionError::MissingToken));
}
