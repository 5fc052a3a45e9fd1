//! Placeholder pages behind the access gate. The real interface is a
//! single-page application served elsewhere; these exist so the gate has
//! navigable targets and the service answers page requests on its own.

use axum::response::Html;

pub async fn home() -> Html<&'static str> {
    Html("<!DOCTYPE html><title>portier</title><h1>Welcome</h1>")
}

pub async fn signup() -> Html<&'static str> {
    Html("<!DOCTYPE html><title>portier - signup</title><h1>Sign up</h1>")
}

pub async fn forgot_password() -> Html<&'static str> {
    Html("<!DOCTYPE html><title>portier - reset</title><h1>Reset password</h1>")
}

pub async fn dashboard() -> Html<&'static str> {
    Html("<!DOCTYPE html><title>portier - dashboard</title><h1>Dashboard</h1>")
}
