//! Application controller
//!
//! `App` owns the state a page needs between renders: the active view, the
//! cached reference lists, the last search and the session. User actions are
//! methods; a failed action returns the `Notice` to show and records it as
//! `App::notice`.

use chrono::NaiveDate;

use crate::client::api::CargoApi;
use crate::client::autocomplete::StationField;
use crate::client::session::{SessionStore, ADMIN_TOKEN_KEY, USER_EMAIL_KEY, USER_TOKEN_KEY};
use crate::client::ClientError;
use crate::model::{
    AdminLoginRequest, BookingRequest, BookingResponse, ContainerType, DeliveryTerm, LoginRequest,
    Port, RegisterRequest, SearchQuery, SearchResult, ShippingRoute,
};
use crate::validation::{validate_booking, validate_registration, validate_search, ValidationError};

pub const SEARCH_FAILED: &str = "Search failed. Please try again.";
pub const SIGN_IN_TO_BOOK: &str = "Please sign in to book a route.";
pub const BOOKING_FAILED: &str = "Booking failed. Please try again.";
pub const BOOKING_SENT: &str = "Booking request sent. We will contact you shortly.";
pub const EMAIL_TAKEN: &str = "User with this email already exists.";
pub const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";
pub const REGISTERED: &str = "Registration successful. You can now sign in.";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const LOGIN_FAILED: &str = "Login failed. Please try again.";
pub const INVALID_ADMIN_LOGIN: &str = "Invalid login or password";
pub const ADMIN_REQUEST_FAILED: &str = "Request failed. Please try again.";
pub const WEBHOOK_REQUIRED: &str = "Webhook URL is required";
pub const WEBHOOK_SAVED: &str = "Webhook URL saved";
pub const SESSION_FAILED: &str = "Could not save the session.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    Registration,
    Login,
    AdminLogin,
    Admin,
}

/// Feedback for the user
///
/// `Alert` is a blocking popup raised by client-side checks; `Status` is an
/// inline message under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Alert(String),
    Status(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Alert(message) | Notice::Status(message) => message,
        }
    }
}

impl From<ValidationError> for Notice {
    fn from(err: ValidationError) -> Self {
        Notice::Alert(err.to_string())
    }
}

/// What the page header shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderState {
    Anonymous,
    Customer { email: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchForm {
    pub origin: StationField,
    pub destination: StationField,
    pub departure_date_from: Option<NaiveDate>,
    pub departure_date_to: Option<NaiveDate>,
    pub container_type: String,
    pub is_dangerous_cargo: bool,
    pub containers_count: u32,
    pub cargo_weight_kg: Option<u32>,
    pub cargo_volume_m3: Option<u32>,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            origin: StationField::default(),
            destination: StationField::default(),
            departure_date_from: None,
            departure_date_to: None,
            container_type: "20ft".to_string(),
            is_dangerous_cargo: false,
            containers_count: 1,
            cargo_weight_kg: None,
            cargo_volume_m3: None,
        }
    }
}

impl SearchForm {
    /// Resolves both stations and builds the query; nothing is sent
    pub fn to_query(&self, stations: &[Port]) -> Result<SearchQuery, ValidationError> {
        let origin_port = self
            .origin
            .submitted_code(stations)
            .ok_or_else(|| ValidationError::UnknownStation(self.origin.text().trim().to_string()))?;
        let destination_port = self.destination.submitted_code(stations).ok_or_else(|| {
            ValidationError::UnknownStation(self.destination.text().trim().to_string())
        })?;
        let departure_date_from = self
            .departure_date_from
            .ok_or(ValidationError::MissingField("departure_date_from"))?;
        let departure_date_to = self
            .departure_date_to
            .ok_or(ValidationError::MissingField("departure_date_to"))?;

        let query = SearchQuery {
            origin_port,
            destination_port,
            departure_date_from,
            departure_date_to,
            container_type: self.container_type.clone(),
            is_dangerous_cargo: self.is_dangerous_cargo,
            containers_count: self.containers_count,
            cargo_weight_kg: self.cargo_weight_kg,
            cargo_volume_m3: self.cargo_volume_m3,
        };
        validate_search(&query)?;
        Ok(query)
    }
}

/// Fields the customer fills in for a selected offer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingForm {
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub pickup_address: String,
    pub delivery_address: String,
    pub cargo_description: String,
    pub delivery_term: String,
    pub hs_code: String,
    pub customs_broker: String,

    /// Attached file names
    pub documents: Vec<String>,
    pub comment: String,
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl BookingForm {
    pub fn to_request(&self, offer: &SearchResult, containers_count: u32) -> BookingRequest {
        BookingRequest {
            route_id: offer.id.clone(),
            origin_port: offer.origin_port.clone(),
            destination_port: offer.destination_port.clone(),
            container_type: offer.container_type.clone(),
            containers_count,
            price_usd: offer.price_from_usd,
            company_name: self.company_name.trim().to_string(),
            contact_person: self.contact_person.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            pickup_address: self.pickup_address.trim().to_string(),
            delivery_address: self.delivery_address.trim().to_string(),
            cargo_description: self.cargo_description.trim().to_string(),
            delivery_term: self.delivery_term.trim().to_string(),
            hs_code: optional(&self.hs_code),
            customs_broker: optional(&self.customs_broker),
            documents: self.documents.clone(),
            comment: optional(&self.comment),
        }
    }
}

pub struct App<A: CargoApi, S: SessionStore> {
    api: A,
    session: S,
    view: View,
    notice: Option<Notice>,

    pub stations: Vec<Port>,
    pub container_types: Vec<ContainerType>,
    pub delivery_terms: Vec<DeliveryTerm>,
    pub results: Vec<SearchResult>,
    pub last_query: Option<SearchQuery>,
    pub last_booking: Option<BookingResponse>,

    /// Back office lists, filled by `load_admin_data`
    pub admin_container_types: Vec<ContainerType>,
    pub admin_routes: Vec<ShippingRoute>,
    pub webhook_url: String,
}

impl<A: CargoApi, S: SessionStore> App<A, S> {
    pub fn new(api: A, session: S) -> Self {
        Self {
            api,
            session,
            view: View::Home,
            notice: None,
            stations: Vec::new(),
            container_types: Vec::new(),
            delivery_terms: Vec::new(),
            results: Vec::new(),
            last_query: None,
            last_booking: None,
            admin_container_types: Vec::new(),
            admin_routes: Vec::new(),
            webhook_url: String::new(),
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn fail(&mut self, notice: Notice) -> Notice {
        self.notice = Some(notice.clone());
        notice
    }

    fn succeed(&mut self, message: &str) {
        self.notice = Some(Notice::Status(message.to_string()));
    }

    /// The stored email is shown from registration on; booking still needs
    /// the token issued by `login`
    pub fn header(&self) -> HeaderState {
        match self.session.get(USER_EMAIL_KEY) {
            Some(email) => HeaderState::Customer { email },
            None => HeaderState::Anonymous,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.session.contains(ADMIN_TOKEN_KEY)
    }

    pub fn open_registration(&mut self) {
        self.view = View::Registration;
        self.notice = None;
    }

    pub fn open_login(&mut self) {
        self.view = View::Login;
        self.notice = None;
    }

    /// Goes straight to the back office when an admin token is stored
    pub fn open_admin(&mut self) {
        self.view = if self.is_admin() {
            View::Admin
        } else {
            View::AdminLogin
        };
        self.notice = None;
    }

    pub fn go_home(&mut self) {
        self.view = View::Home;
    }

    /// Fetches the lists the forms need; each list that fails to load stays empty
    pub async fn load_reference_data(&mut self) {
        match self.api.ports().await {
            Ok(ports) => self.stations = ports,
            Err(err) => tracing::warn!("Failed to load stations: {}", err),
        }
        match self.api.container_types().await {
            Ok(containers) => self.container_types = containers,
            Err(err) => tracing::warn!("Failed to load container types: {}", err),
        }
        match self.api.delivery_terms().await {
            Ok(terms) => self.delivery_terms = terms,
            Err(err) => tracing::warn!("Failed to load delivery terms: {}", err),
        }
    }

    pub fn origin_suggestions<'a>(&'a self, form: &SearchForm) -> Vec<&'a Port> {
        form.origin.suggestions(&self.stations, &form.destination)
    }

    pub fn destination_suggestions<'a>(&'a self, form: &SearchForm) -> Vec<&'a Port> {
        form.destination.suggestions(&self.stations, &form.origin)
    }

    pub async fn submit_search(&mut self, form: &SearchForm) -> Result<&[SearchResult], Notice> {
        let query = match form.to_query(&self.stations) {
            Ok(query) => query,
            Err(err) => return Err(self.fail(err.into())),
        };

        match self.api.search(&query).await {
            Ok(results) => {
                tracing::debug!(count = results.len(), "search finished");
                self.results = results;
                self.last_query = Some(query);
                self.notice = None;
                Ok(self.results.as_slice())
            }
            Err(err) => {
                tracing::warn!("Search failed: {}", err);
                self.results.clear();
                Err(self.fail(Notice::Alert(SEARCH_FAILED.to_string())))
            }
        }
    }

    /// Creates an account; the customer still has to sign in afterwards
    pub async fn register(&mut self, email: &str, password: &str) -> Result<(), Notice> {
        if let Err(err) = validate_registration(email, password) {
            return Err(self.fail(err.into()));
        }

        let request = RegisterRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        match self.api.register(&request).await {
            Ok(_) => {
                self.store(USER_EMAIL_KEY, &request.email)?;
                self.view = View::Home;
                self.succeed(REGISTERED);
                Ok(())
            }
            Err(err) if err.status() == Some(400) => {
                Err(self.fail(Notice::Status(EMAIL_TAKEN.to_string())))
            }
            Err(err) => {
                tracing::warn!("Registration failed: {}", err);
                Err(self.fail(Notice::Status(REGISTRATION_FAILED.to_string())))
            }
        }
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), Notice> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        match self.api.login(&request).await {
            Ok(token) => {
                self.store(USER_TOKEN_KEY, &token.access_token)?;
                self.store(USER_EMAIL_KEY, &request.email)?;
                self.view = View::Home;
                self.notice = None;
                Ok(())
            }
            Err(err) if matches!(err.status(), Some(400) | Some(401)) => {
                Err(self.fail(Notice::Status(INVALID_CREDENTIALS.to_string())))
            }
            Err(err) => {
                tracing::warn!("Login failed: {}", err);
                Err(self.fail(Notice::Status(LOGIN_FAILED.to_string())))
            }
        }
    }

    pub async fn admin_login(&mut self, login: &str, password: &str) -> Result<(), Notice> {
        let request = AdminLoginRequest {
            login: login.to_string(),
            password: password.to_string(),
        };
        match self.api.admin_login(&request).await {
            Ok(token) => {
                self.store(ADMIN_TOKEN_KEY, &token.access_token)?;
                self.view = View::Admin;
                self.notice = None;
                Ok(())
            }
            Err(err) => {
                tracing::debug!("Admin login failed: {}", err);
                Err(self.fail(Notice::Status(INVALID_ADMIN_LOGIN.to_string())))
            }
        }
    }

    pub fn logout(&mut self) -> Result<(), Notice> {
        self.discard(USER_TOKEN_KEY)?;
        self.discard(USER_EMAIL_KEY)?;
        self.view = View::Home;
        Ok(())
    }

    pub fn admin_logout(&mut self) -> Result<(), Notice> {
        self.discard(ADMIN_TOKEN_KEY)?;
        self.admin_container_types.clear();
        self.admin_routes.clear();
        self.webhook_url.clear();
        self.view = View::Home;
        Ok(())
    }

    /// Books `offer` for the container count of the last search
    ///
    /// Without a customer session the login view is opened instead. The form
    /// is cleared only after the booking is accepted.
    pub async fn submit_booking(
        &mut self,
        form: &mut BookingForm,
        offer: &SearchResult,
    ) -> Result<BookingResponse, Notice> {
        let Some(token) = self.session.get(USER_TOKEN_KEY) else {
            self.view = View::Login;
            return Err(self.fail(Notice::Alert(SIGN_IN_TO_BOOK.to_string())));
        };

        let containers_count = self
            .last_query
            .as_ref()
            .map(|query| query.containers_count)
            .unwrap_or(1);
        let request = form.to_request(offer, containers_count);
        if let Err(err) = validate_booking(&request) {
            return Err(self.fail(err.into()));
        }

        match self.api.book(&token, &request).await {
            Ok(response) => {
                tracing::info!(booking_id = %response.booking_id, "booking submitted");
                *form = BookingForm::default();
                self.last_booking = Some(response.clone());
                self.succeed(BOOKING_SENT);
                Ok(response)
            }
            Err(err) => {
                tracing::warn!("Booking failed: {}", err);
                let message = match &err {
                    ClientError::Status { status: 400, message } => message.clone(),
                    _ => BOOKING_FAILED.to_string(),
                };
                Err(self.fail(Notice::Alert(message)))
            }
        }
    }

    fn admin_token(&mut self) -> Result<String, Notice> {
        match self.session.get(ADMIN_TOKEN_KEY) {
            Some(token) => Ok(token),
            None => {
                self.view = View::AdminLogin;
                Err(self.fail(Notice::Status(INVALID_ADMIN_LOGIN.to_string())))
            }
        }
    }

    fn admin_failure(&mut self, action: &str, err: ClientError) -> Notice {
        tracing::warn!("{} failed: {}", action, err);
        let message = match err {
            ClientError::Status { status: 400, message }
            | ClientError::Status { status: 404, message } => message,
            _ => ADMIN_REQUEST_FAILED.to_string(),
        };
        self.fail(Notice::Status(message))
    }

    /// Refreshes the back office lists and the webhook URL
    pub async fn load_admin_data(&mut self) -> Result<(), Notice> {
        let token = self.admin_token()?;

        let containers = self.api.admin_container_types(&token).await;
        let routes = self.api.admin_routes(&token).await;
        let webhook = self.api.webhook_url(&token).await;

        match (containers, routes, webhook) {
            (Ok(containers), Ok(routes), Ok(webhook)) => {
                self.admin_container_types = containers;
                self.admin_routes = routes;
                self.webhook_url = webhook;
                Ok(())
            }
            (Err(err), _, _) | (_, Err(err), _) | (_, _, Err(err)) => {
                Err(self.admin_failure("Loading admin data", err))
            }
        }
    }

    pub async fn create_container_type(
        &mut self,
        container: &ContainerType,
    ) -> Result<ContainerType, Notice> {
        let token = self.admin_token()?;
        match self.api.admin_create_container_type(&token, container).await {
            Ok(created) => {
                self.admin_container_types.push(created.clone());
                self.admin_container_types.sort_by(|a, b| a.name.cmp(&b.name));
                Ok(created)
            }
            Err(err) => Err(self.admin_failure("Creating container type", err)),
        }
    }

    pub async fn delete_container_type(&mut self, id: &str) -> Result<(), Notice> {
        let token = self.admin_token()?;
        match self.api.admin_delete_container_type(&token, id).await {
            Ok(()) => {
                self.admin_container_types.retain(|c| c.id != id);
                Ok(())
            }
            Err(err) => Err(self.admin_failure("Deleting container type", err)),
        }
    }

    pub async fn create_route(&mut self, route: &ShippingRoute) -> Result<ShippingRoute, Notice> {
        let token = self.admin_token()?;
        match self.api.admin_create_route(&token, route).await {
            Ok(created) => {
                self.admin_routes.push(created.clone());
                Ok(created)
            }
            Err(err) => Err(self.admin_failure("Creating route", err)),
        }
    }

    pub async fn delete_route(&mut self, id: &str) -> Result<(), Notice> {
        let token = self.admin_token()?;
        match self.api.admin_delete_route(&token, id).await {
            Ok(()) => {
                self.admin_routes.retain(|r| r.id != id);
                Ok(())
            }
            Err(err) => Err(self.admin_failure("Deleting route", err)),
        }
    }

    pub async fn save_webhook_url(&mut self, url: &str) -> Result<(), Notice> {
        let url = url.trim();
        if url.is_empty() {
            return Err(self.fail(Notice::Alert(WEBHOOK_REQUIRED.to_string())));
        }

        let token = self.admin_token()?;
        match self.api.set_webhook_url(&token, url).await {
            Ok(()) => {
                self.webhook_url = url.to_string();
                self.succeed(WEBHOOK_SAVED);
                Ok(())
            }
            Err(err) => Err(self.admin_failure("Saving webhook URL", err)),
        }
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), Notice> {
        if let Err(err) = self.session.set(key, value) {
            tracing::error!("Failed to store {}: {}", key, err);
            return Err(self.fail(Notice::Alert(SESSION_FAILED.to_string())));
        }
        Ok(())
    }

    fn discard(&mut self, key: &str) -> Result<(), Notice> {
        if let Err(err) = self.session.remove(key) {
            tracing::error!("Failed to remove {}: {}", key, err);
            return Err(self.fail(Notice::Alert(SESSION_FAILED.to_string())));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TRANSPORT_RAIL;

    fn station(name: &str, code: &str) -> Port {
        Port {
            id: code.to_lowercase(),
            name: name.to_string(),
            code: code.to_string(),
            country: "Китай".to_string(),
            city: name.to_string(),
            transport_types: vec![TRANSPORT_RAIL.to_string()],
        }
    }

    fn offer() -> SearchResult {
        SearchResult {
            id: "offer-1".into(),
            origin_port: "CTU".into(),
            destination_port: "LED".into(),
            carrier: "RZD Logistics".into(),
            departure_date_range: "01.03 - 15.03.2025".into(),
            transit_time_days: 12,
            container_type: "40ft".into(),
            price_from_usd: 5200.0,
            is_dangerous_cargo: false,
            available_containers: 7,
            booking_deadline: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            webhook_success: None,
            webhook_error: None,
        }
    }

    #[test]
    fn query_uses_selected_and_resolved_codes() {
        let stations = vec![station("Чэнду", "CTU"), station("Сиань", "XIY")];
        let mut form = SearchForm {
            departure_date_from: NaiveDate::from_ymd_opt(2025, 3, 1),
            departure_date_to: NaiveDate::from_ymd_opt(2025, 3, 15),
            ..SearchForm::default()
        };
        form.origin.select(&stations[0]);
        form.destination.input("сиань");

        let query = form.to_query(&stations).unwrap();
        assert_eq!(query.origin_port, "CTU");
        assert_eq!(query.destination_port, "XIY");
    }

    #[test]
    fn query_reports_unknown_station_text() {
        let stations = vec![station("Чэнду", "CTU")];
        let mut form = SearchForm::default();
        form.origin.input("Атлантида");
        form.destination.select(&stations[0]);

        assert_eq!(
            form.to_query(&stations),
            Err(ValidationError::UnknownStation("Атлантида".to_string()))
        );
    }

    #[test]
    fn booking_request_trims_and_drops_blank_optionals() {
        let form = BookingForm {
            company_name: "  Silk Freight LLC ".into(),
            hs_code: "   ".into(),
            customs_broker: "Broker Ltd".into(),
            ..BookingForm::default()
        };
        let request = form.to_request(&offer(), 3);

        assert_eq!(request.route_id, "offer-1");
        assert_eq!(request.containers_count, 3);
        assert_eq!(request.price_usd, 5200.0);
        assert_eq!(request.company_name, "Silk Freight LLC");
        assert_eq!(request.hs_code, None);
        assert_eq!(request.customs_broker.as_deref(), Some("Broker Ltd"));
    }

    #[test]
    fn validation_errors_become_alerts() {
        let notice: Notice = ValidationError::SameEndpoints.into();
        assert!(matches!(notice, Notice::Alert(_)));
        assert_eq!(
            notice.message(),
            "Origin and destination must be different stations"
        );
    }
}
