//! Route table and active-location tracking.
//!
//! The navigator owns one screen per `Location` and remembers which one is
//! showing. It knows nothing about the session; screens read the session
//! themselves.

use log::{debug, warn};

use super::location::Location;

/// Something a route can display.
pub trait Screen {
    /// Heading shown for this screen.
    fn title(&self) -> &str;
}

/// One entry in the route table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route<S> {
    /// Where this route lives.
    pub location: Location,

    /// What is shown there.
    pub screen: S,
}

impl<S> Route<S> {
    /// Create a route.
    pub fn new(location: Location, screen: S) -> Self {
        Self { location, screen }
    }

    /// Route name (`"start"`, `"game"`, `"end"`).
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.location.name()
    }

    /// Route path (`"/"`, `"/game"`, `"/end"`).
    #[must_use]
    pub fn path(&self) -> &'static str {
        self.location.path()
    }
}

/// Maps each location to its screen; exactly one location is active.
#[derive(Clone, Debug)]
pub struct Navigator<S> {
    routes: [Route<S>; 3],
    current: Location,
}

impl<S> Navigator<S> {
    /// Build the route table. Starts at `Location::Start`.
    pub fn new(start: S, game: S, end: S) -> Self {
        Self {
            routes: [
                Route::new(Location::Start, start),
                Route::new(Location::Game, game),
                Route::new(Location::End, end),
            ],
            current: Location::Start,
        }
    }

    /// Location currently shown.
    #[must_use]
    pub fn current(&self) -> Location {
        self.current
    }

    /// Screen currently shown.
    #[must_use]
    pub fn current_screen(&self) -> &S {
        self.screen(self.current)
    }

    /// Check whether `location` is the active one.
    #[must_use]
    pub fn is_active(&self, location: Location) -> bool {
        self.current == location
    }

    /// Screen registered for `location`.
    #[must_use]
    pub fn screen(&self, location: Location) -> &S {
        &self.routes[location.index()].screen
    }

    /// Mutable screen registered for `location`.
    pub fn screen_mut(&mut self, location: Location) -> &mut S {
        &mut self.routes[location.index()].screen
    }

    /// All routes in table order.
    #[must_use]
    pub fn routes(&self) -> &[Route<S>] {
        &self.routes
    }

    /// Make `location` active and return its screen.
    pub fn navigate(&mut self, location: Location) -> &S {
        if self.current != location {
            debug!("Navigating {} -> {}", self.current, location);
        }
        self.current = location;
        self.screen(location)
    }

    /// Navigate by route name. Unknown names leave the active location alone.
    pub fn navigate_by_name(&mut self, name: &str) -> Option<&S> {
        match Location::from_name(name) {
            Some(location) => Some(self.navigate(location)),
            None => {
                warn!("No route named {:?}", name);
                None
            }
        }
    }

    /// Navigate by route path. Unknown paths leave the active location alone.
    pub fn navigate_by_path(&mut self, path: &str) -> Option<&S> {
        match Location::from_path(path) {
            Some(location) => Some(self.navigate(location)),
            None => {
                warn!("No route for path {:?}", path);
                None
            }
        }
    }
}

impl<S: Screen> Navigator<S> {
    /// Title of the active screen.
    #[must_use]
    pub fn current_title(&self) -> &str {
        self.current_screen().title()
    }
}
