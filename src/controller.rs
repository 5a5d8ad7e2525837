//! Session and navigation controller.
//!
//! Each public method is one user action: it reads the page, validates what it
//! read, talks to the backend when needed and leaves a visible trace on the
//! page (alert, navigation or reload). Validation failures never reach the
//! network, and remote failures leave the page and session as they were
//! (apart from a rejected connect, which resets both).

use crate::api::{ApiClient, Endpoint};
use crate::errors::{AppError, RemoteError};
use crate::models::{
    AddCategoryRequest, AddDescriptionRequest, AddDocumentRequest, AddElementRequest,
    AddOrderRequest, AddOrderRuleRequest, AnalyzeRequest, ConnectRequest,
};
use crate::page::Page;
use crate::properties::{PropertyList, RowId};
use crate::routes::{Id, Route, last_segment, parse_id};
use crate::session::Session;
use tracing::{info, warn};

pub const PASSWORD_FIELD: &str = "connect-password";
pub const CATEGORY_NAME_FIELD: &str = "category-name";
pub const PROPERTY_NAME_FIELD: &str = "property-name";
pub const DOCUMENT_NAME_FIELD: &str = "document-name";
pub const ELEMENT_FIELD: &str = "element";
pub const DESCRIPTION_FIELD: &str = "description";
pub const LARGE_FIELD: &str = "large";
pub const SMALL_FIELD: &str = "small";

pub const GENERIC_ERROR: &str = "An error has occurred";
pub const WRONG_PASSWORD: &str = "Wrong password";
pub const ORDER_RULE_ADDED: &str = "Order rule added";

pub struct Controller<P: Page> {
    api: ApiClient,
    session: Session,
    page: P,
    properties: PropertyList,
}

impl<P: Page> Controller<P> {
    pub fn new(api: ApiClient, session: Session, page: P) -> Self {
        Self {
            api,
            session,
            page,
            properties: PropertyList::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn properties(&self) -> &PropertyList {
        &self.properties
    }

    pub fn into_parts(self) -> (Session, P) {
        (self.session, self.page)
    }

    /// Page-load hook: a connected session never sees the connect page.
    pub fn ready(&mut self) {
        if Route::parse(&self.page.path()) == Some(Route::Index) && self.session.is_connected() {
            info!("session already connected, skipping connect page");
            self.page.navigate(Route::Archive);
        }
    }

    pub async fn connect(&mut self) {
        // Sent and stored exactly as typed; only a blank field is refused.
        let password = self.page.field(PASSWORD_FIELD).unwrap_or_default();
        if password.trim().is_empty() {
            self.page.alert("Please enter a password");
            return;
        }

        let request = ConnectRequest {
            password: &password,
        };
        match self.api.post(Endpoint::Connect, &request, &self.session).await {
            Ok(_) => {
                info!("connected to archive");
                self.session.connect(password);
                self.page.reload();
            }
            Err(RemoteError::Application { .. }) => {
                warn!("connect rejected");
                self.session.disconnect();
                self.page.set_field(PASSWORD_FIELD, "");
                self.page.alert(WRONG_PASSWORD);
            }
            Err(err) => self.report(err),
        }
    }

    pub fn disconnect(&mut self) {
        info!("disconnecting");
        self.session.disconnect();
        self.page.navigate(Route::Index);
    }

    pub fn enter_as_guest(&mut self) {
        self.page.navigate(Route::Archive);
    }

    pub fn view(&mut self, route: Route) {
        self.page.navigate(route);
    }

    /// Navigation from a clicked element carrying the target id in its `value`.
    pub fn view_with_value(&mut self, route: fn(Id) -> Route, value: &str) {
        match parse_id(value) {
            Ok(id) => self.page.navigate(route(id)),
            Err(err) => self.report_local(err),
        }
    }

    /// Navigation parametrized by the id at the end of the current location.
    pub fn view_from_location(&mut self, route: fn(Id) -> Route) {
        if let Some(id) = self.location_id() {
            self.page.navigate(route(id));
        }
    }

    pub fn add_property(&mut self) -> Option<RowId> {
        let label = self.required(PROPERTY_NAME_FIELD, "Please enter a property name")?;
        self.page.set_field(PROPERTY_NAME_FIELD, "");
        Some(self.properties.push(label))
    }

    pub fn remove_property(&mut self, row: RowId) -> bool {
        self.properties.remove(row)
    }

    pub async fn add_category(&mut self) {
        let Some(name) = self.required(CATEGORY_NAME_FIELD, "Please enter a name") else {
            return;
        };

        let request = AddCategoryRequest {
            name,
            properties: self.properties.labels(),
        };
        match self.api.post(Endpoint::AddCategory, &request, &self.session).await {
            Ok(_) => {
                info!(name = %request.name, "category added");
                self.page.navigate(Route::Categories);
            }
            Err(err) => self.report(err),
        }
    }

    pub async fn add_document(&mut self) {
        let Some(name) = self.required(DOCUMENT_NAME_FIELD, "Please enter a name") else {
            return;
        };

        let request = AddDocumentRequest { name };
        match self.api.post(Endpoint::AddDocument, &request, &self.session).await {
            Ok(_) => {
                info!(name = %request.name, "document added");
                self.page.navigate(Route::Documents);
            }
            Err(err) => self.report(err),
        }
    }

    pub async fn add_element(&mut self) {
        let Some(category) = self.location_id() else {
            return;
        };

        let request = AddElementRequest { category };
        match self.api.post(Endpoint::AddElement, &request, &self.session).await {
            Ok(_) => {
                info!(category, "element added");
                self.page.reload();
            }
            Err(err) => self.report(err),
        }
    }

    pub async fn add_description(&mut self) {
        let Some(document) = self.location_id() else {
            return;
        };
        let Some(element) = self.required(ELEMENT_FIELD, "Please choose an element") else {
            return;
        };
        let Some(description) = self.required(DESCRIPTION_FIELD, "Please enter a description")
        else {
            return;
        };
        let element = match parse_id(&element) {
            Ok(element) => element,
            Err(err) => return self.report_local(err),
        };

        let request = AddDescriptionRequest {
            document,
            element,
            description,
        };
        match self.api.post(Endpoint::AddDescription, &request, &self.session).await {
            Ok(_) => {
                info!(document, element, "description added");
                self.page.navigate(Route::Document(document));
            }
            Err(err) => self.report(err),
        }
    }

    pub async fn add_order(&mut self) {
        let Some(document) = self.location_id() else {
            return;
        };
        let Some((large, small)) = self.distinct_pair("points") else {
            return;
        };

        let request = AddOrderRequest {
            document,
            large,
            small,
        };
        match self.api.post(Endpoint::AddOrder, &request, &self.session).await {
            Ok(_) => {
                info!(document, large, small, "order added");
                self.page.navigate(Route::Document(document));
            }
            Err(err) => self.report(err),
        }
    }

    pub async fn add_order_rule(&mut self) {
        let Some(category) = self.location_id() else {
            return;
        };
        let Some((large, small)) = self.distinct_pair("properties") else {
            return;
        };

        let request = AddOrderRuleRequest { large, small };
        match self.api.post(Endpoint::AddOrderRule, &request, &self.session).await {
            Ok(_) => {
                info!(category, large, small, "order rule added");
                self.page.alert(ORDER_RULE_ADDED);
                self.page.navigate(Route::Category(category));
            }
            Err(err) => self.report(err),
        }
    }

    pub async fn analyze(&mut self) {
        match self.api.post(Endpoint::Analyze, &AnalyzeRequest {}, &self.session).await {
            Ok(_) => {
                info!("archive analyzed");
                self.page.reload();
            }
            Err(err) => self.report(err),
        }
    }

    /// Trimmed, non-empty value of `field`, or an alert.
    fn required(&mut self, field: &str, message: &str) -> Option<String> {
        let value = self
            .page
            .field(field)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        if value.is_none() {
            self.page.alert(message);
        }
        value
    }

    fn distinct_pair(&mut self, noun: &str) -> Option<(Id, Id)> {
        let chosen = |value: Option<String>| {
            value
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let large = chosen(self.page.field(LARGE_FIELD));
        let small = chosen(self.page.field(SMALL_FIELD));
        let (Some(large), Some(small)) = (large, small) else {
            self.page.alert(&format!("Please choose two {noun}"));
            return None;
        };
        match (parse_id(&large), parse_id(&small)) {
            (Ok(large), Ok(small)) if large == small => {
                self.page.alert(&format!("Please choose different {noun}"));
                None
            }
            (Ok(large), Ok(small)) => Some((large, small)),
            (Err(err), _) | (_, Err(err)) => {
                self.report_local(err);
                None
            }
        }
    }

    fn location_id(&mut self) -> Option<Id> {
        let path = self.page.path();
        let parsed = match last_segment(&path) {
            Some(segment) => parse_id(segment),
            None => Err(AppError::new(format!("no identifier in location '{path}'"))),
        };
        match parsed {
            Ok(id) => Some(id),
            Err(err) => {
                self.report_local(err);
                None
            }
        }
    }

    fn report_local(&mut self, err: AppError) {
        warn!("{err}");
        self.page.alert(GENERIC_ERROR);
    }

    fn report(&mut self, err: RemoteError) {
        warn!("{err}");
        match err {
            RemoteError::Application { endpoint } => self.page.alert(rejection_message(endpoint)),
            RemoteError::Transport { .. } => self.page.alert(GENERIC_ERROR),
        }
    }
}

pub fn rejection_message(endpoint: Endpoint) -> &'static str {
    match endpoint {
        Endpoint::Connect => WRONG_PASSWORD,
        Endpoint::AddCategory => "Could not add the category",
        Endpoint::AddDocument => "Could not add the document",
        Endpoint::AddElement => "Could not add the element",
        Endpoint::AddDescription => "Could not add the description",
        Endpoint::AddOrder => "Could not add the order",
        Endpoint::AddOrderRule => "Could not add the order rule",
        Endpoint::Analyze => "Could not analyze the archive",
    }
}
