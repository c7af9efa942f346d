use serde::{Deserialize, Serialize};
use tsify::Tsify;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(tag = "view")]
pub enum Route {
    Login,
    MainMenu,
    SoloSelect,
    MultiplayerLobby,
    /// `mode` and `game` are handed to the view as props.
    GameRoom { mode: String, game: String },
}

impl Route {
    /// Params are inserted as-is, so a `mode` or `game` containing `/`, `?` or `#` yields a
    /// path that resolves elsewhere. In the browser, `route_href` percent-encodes them.
    pub fn href(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::MainMenu => "/menu".to_string(),
            Route::SoloSelect => "/solo".to_string(),
            Route::MultiplayerLobby => "/multiplayer".to_string(),
            Route::GameRoom { mode, game } => format!("/game/{mode}/{game}"),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum View {
    Login,
    MainMenu,
    SoloSelect,
    MultiplayerLobby,
    GameRoom,
}

#[derive(Clone, Copy, Debug)]
enum Target {
    View(View),
    Redirect(&'static str),
}

struct RouteDef {
    pattern: &'static str,
    target: Target,
}

const CATCH_ALL: &str = "*";

/// Tried in order; the first pattern that matches wins.
const ROUTES: &[RouteDef] = &[
    RouteDef {
        pattern: "/",
        target: Target::Redirect("/login"),
    },
    RouteDef {
        pattern: "/login",
        target: Target::View(View::Login),
    },
    RouteDef {
        pattern: "/menu",
        target: Target::View(View::MainMenu),
    },
    RouteDef {
        pattern: "/solo",
        target: Target::View(View::SoloSelect),
    },
    RouteDef {
        pattern: "/multiplayer",
        target: Target::View(View::MultiplayerLobby),
    },
    RouteDef {
        pattern: "/game/:mode/:game",
        target: Target::View(View::GameRoom),
    },
    RouteDef {
        pattern: CATCH_ALL,
        target: Target::Redirect("/login"),
    },
];

const MAX_REDIRECTS: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct RouteMatch {
    /// The path that ends up displayed, after redirects.
    pub path: String,
    pub route: Route,
    /// The requested path, if a redirect happened.
    pub redirected_from: Option<String>,
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Returns the captured `:params` in pattern order, or `None` if `path` doesn't match.
fn match_pattern<'a>(pattern: &'static str, path: &'a str) -> Option<Vec<(&'static str, &'a str)>> {
    if pattern == CATCH_ALL {
        return Some(Vec::new());
    }
    let pattern: Vec<&'static str> = segments(pattern).collect();
    let path: Vec<&'a str> = segments(path).collect();
    if pattern.len() != path.len() {
        return None;
    }

    let mut params = Vec::new();
    for (expected, actual) in pattern.into_iter().zip(path) {
        if let Some(name) = expected.strip_prefix(':') {
            params.push((name, actual));
        } else if !expected.eq_ignore_ascii_case(actual) {
            return None;
        }
    }
    Some(params)
}

fn build(view: View, params: &[(&str, &str)]) -> Route {
    let param = |wanted: &str| {
        params
            .iter()
            .find(|(name, _)| *name == wanted)
            .map(|(_, value)| value.to_string())
            .unwrap_or_default()
    };
    match view {
        View::Login => Route::Login,
        View::MainMenu => Route::MainMenu,
        View::SoloSelect => Route::SoloSelect,
        View::MultiplayerLobby => Route::MultiplayerLobby,
        View::GameRoom => Route::GameRoom {
            mode: param("mode"),
            game: param("game"),
        },
    }
}

fn suffix_start(path: &str) -> usize {
    path.find(['?', '#']).unwrap_or(path.len())
}

/// Drops the query string and fragment.
fn strip_suffix(path: &str) -> &str {
    &path[..suffix_start(path)]
}

/// The address to put in history for `requested`: the resolved path, plus the requested
/// query string and fragment unless a redirect sent it somewhere else.
pub fn history_url(requested: &str, matched: &RouteMatch) -> String {
    if matched.redirected_from.is_some() {
        return matched.path.clone();
    }
    format!("{}{}", matched.path, &requested[suffix_start(requested)..])
}

pub fn resolve(path: &str) -> RouteMatch {
    let requested = strip_suffix(path).to_string();
    let mut current = requested.clone();

    for _ in 0..MAX_REDIRECTS {
        let Some((def, params)) = ROUTES
            .iter()
            .find_map(|def| match_pattern(def.pattern, &current).map(|params| (def, params)))
        else {
            break;
        };

        match def.target {
            Target::View(view) => {
                let route = build(view, &params);
                let redirected_from = (current != requested).then(|| requested.clone());
                return RouteMatch {
                    path: current,
                    route,
                    redirected_from,
                };
            }
            Target::Redirect(to) => {
                log::debug!("Redirecting {current} to {to}");
                current = to.to_string();
            }
        }
    }

    log::warn!("Could not resolve {requested}, falling back to the login page");
    RouteMatch {
        path: Route::Login.href(),
        route: Route::Login,
        redirected_from: Some(requested),
    }
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{Route, RouteMatch, history_url, resolve};
    use wasm_bindgen::{JsCast, closure::Closure, prelude::*};
    use web_sys::{PopStateEvent, Window};

    fn window() -> Result<Window, JsValue> {
        web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
    }

    fn decode(value: &str) -> Result<String, JsValue> {
        js_sys::decode_uri_component(value).map(String::from)
    }

    fn decoded(mut matched: RouteMatch) -> Result<RouteMatch, JsValue> {
        if let Route::GameRoom { mode, game } = &mut matched.route {
            *mode = decode(mode)?;
            *game = decode(game)?;
        }
        Ok(matched)
    }

    fn location_path(window: &Window) -> Result<String, JsValue> {
        window.location().pathname()
    }

    #[wasm_bindgen]
    pub fn resolve_route(path: String) -> RouteMatch {
        resolve(&path)
    }

    #[wasm_bindgen]
    pub fn route_href(route: Route) -> Result<String, JsValue> {
        match route {
            Route::GameRoom { mode, game } => Ok(format!(
                "/game/{}/{}",
                String::from(js_sys::encode_uri_component(&mode)),
                String::from(js_sys::encode_uri_component(&game))
            )),
            route => Ok(route.href()),
        }
    }

    /// Resolves the address bar, rewriting it in place when a redirect applied.
    #[wasm_bindgen]
    pub fn current_route() -> Result<RouteMatch, JsValue> {
        let window = window()?;
        let matched = resolve(&location_path(&window)?);
        if matched.redirected_from.is_some() {
            window
                .history()?
                .replace_state_with_url(&JsValue::NULL, "", Some(&matched.path))?;
        }
        decoded(matched)
    }

    #[wasm_bindgen]
    pub fn navigate(path: String) -> Result<RouteMatch, JsValue> {
        let window = window()?;
        let matched = resolve(&path);
        let url = history_url(&path, &matched);
        log::info!("Navigating to {url}");
        window
            .history()?
            .push_state_with_url(&JsValue::NULL, "", Some(&url))?;
        decoded(matched)
    }

    /// Calls back with the new route whenever the user moves through history.
    #[wasm_bindgen]
    pub struct RouteSubscription {
        window: Window,
        closure: Closure<dyn FnMut(PopStateEvent)>,
    }

    #[wasm_bindgen]
    impl RouteSubscription {
        #[wasm_bindgen(constructor)]
        pub fn new(callback: js_sys::Function) -> Result<RouteSubscription, JsValue> {
            let window = window()?;
            let closure = Closure::<dyn FnMut(PopStateEvent)>::new(move |_event: PopStateEvent| {
                match current_route() {
                    Ok(matched) => match serde_wasm_bindgen::to_value(&matched) {
                        Ok(matched) => {
                            let _ = callback.call1(&JsValue::null(), &matched);
                        }
                        Err(e) => log::error!("Failed to convert route: {e:?}"),
                    },
                    Err(e) => log::error!("Failed to resolve route: {e:?}"),
                }
            });
            window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())?;
            Ok(Self { window, closure })
        }
    }

    impl Drop for RouteSubscription {
        fn drop(&mut self) {
            let _ = self.window.remove_event_listener_with_callback(
                "popstate",
                self.closure.as_ref().unchecked_ref(),
            );
        }
    }
}
