use super::*;

#[test]
fn signed_in_links_include_profile() {
    let hrefs: Vec<_> = nav_links(true).iter().map(|(href, _)| *href).collect();
    assert_eq!(hrefs, vec!["/profile", "/group-chats", "/anonymous-chat"]);
}

#[test]
fn signed_out_links_offer_login_and_register() {
    let labels: Vec<_> = nav_links(false).iter().map(|(_, label)| *label).collect();
    assert_eq!(labels, vec!["Anonymous chat", "Login", "Register"]);
}
