use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::{
    components::{guard::RequireAuth, layout::Layout},
    pages::{DashboardPage, ForgotPasswordPage, LoginPage, RegisterPage},
    state::{
        auth::{use_auth, AuthProvider},
        theme::provide_theme,
    },
    utils::storage::default_store,
};

pub const ROUTE_PATHS: &[&str] = &["/", "/login", "/register", "/forgot-password", "/dashboard"];

pub const PROTECTED_ROUTE_PATHS: &[&str] = &["/dashboard"];

pub const PUBLIC_ROUTE_PATHS: &[&str] = &["/login", "/register", "/forgot-password"];

/// Where `/` and unknown paths land, given whether the session holds tokens.
pub fn landing_path(is_signed_in: bool) -> &'static str {
    if is_signed_in {
        "/dashboard"
    } else {
        "/login"
    }
}

pub fn mount_app() {
    mount_to_body(App);
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    let store = default_store();
    provide_theme(store.clone());
    view! {
        <Title text="authdeck"/>
        <AuthProvider store=store>
            <Router>
                <Routes>
                    <Route path="/login" view=LoginPage/>
                    <Route path="/register" view=RegisterPage/>
                    <Route path="/forgot-password" view=ForgotPasswordPage/>
                    <Route path="/dashboard" view=ProtectedDashboard/>
                    <Route path="/" view=LandingRedirect/>
                    <Route path="/*any" view=LandingRedirect/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}

#[component]
fn ProtectedDashboard() -> impl IntoView {
    view! {
        <RequireAuth>
            <Layout>
                <DashboardPage/>
            </Layout>
        </RequireAuth>
    }
}

#[component]
fn LandingRedirect() -> impl IntoView {
    let session = use_auth().session;
    let path = landing_path(session.get_untracked().is_signed_in());
    view! { <Redirect path=path/> }
}
