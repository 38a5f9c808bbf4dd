//! Add and edit product form controllers.
//!
//! Form state is a deeply nested local record mirroring the backend's
//! product document: pricing, specification dimensions, feature text, tags,
//! and materials are each separately editable sub-trees. Validation runs at
//! submit time only; a violation produces a user-facing message and no
//! network call. Submission ships a multipart form with a `productData`
//! JSON part (staged images are never serialized into it) plus one `images`
//! part per staged file.

use rand::seq::IndexedRandom;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use daisy_client::ApiClient;
use daisy_core::{AdminProductId, Availability, Currency};

use crate::error::AdminError;

/// Maximum images per product, staged plus retained.
pub const MAX_IMAGES: usize = 10;

/// Free-text feature blurbs shown on the product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Features {
    pub return_policy: String,
    pub shipping: String,
    pub material: String,
    pub care_instructions: String,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            return_policy: "30 days return policy".to_owned(),
            shipping: "Free shipping on orders over $100".to_owned(),
            material: String::new(),
            care_instructions: String::new(),
        }
    }
}

/// Physical dimensions, free-text with units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Dimensions {
    pub length: String,
    pub width: String,
    pub height: String,
    pub weight: String,
}

/// Product specifications sub-tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Specifications {
    pub dimensions: Dimensions,
    pub materials: Vec<String>,
    pub origin: String,
    pub warranty: String,
}

/// Pricing sub-tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    pub discount_percentage: u32,
    pub currency: Currency,
}

/// Local product form state.
///
/// Staged image files live beside this on the controllers, never inside
/// it, so serializing the form yields exactly the `productData` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub size: String,
    pub color: String,
    pub quantity: u32,
    pub stock: u32,
    pub features: Features,
    pub specifications: Specifications,
    pub pricing: PricingForm,
    pub availability: Availability,
    pub tags: Vec<String>,
    pub sku: String,
    pub is_active: bool,
    pub featured: bool,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: Decimal::ZERO,
            category: String::new(),
            size: String::new(),
            color: String::new(),
            quantity: 1,
            stock: 0,
            features: Features::default(),
            specifications: Specifications::default(),
            pricing: PricingForm::default(),
            availability: Availability::InStock,
            tags: Vec::new(),
            sku: String::new(),
            is_active: true,
            featured: false,
        }
    }
}

impl ProductForm {
    /// Add a tag. Trimmed; empty and duplicate tags are ignored.
    pub fn add_tag(&mut self, tag: &str) {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return;
        }
        self.tags.push(tag.to_owned());
    }

    /// Remove a tag by value.
    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    /// Add a specification material. Trimmed; empty and duplicate entries
    /// are ignored.
    pub fn add_material(&mut self, material: &str) {
        let material = material.trim();
        if material.is_empty()
            || self
                .specifications
                .materials
                .iter()
                .any(|m| m == material)
        {
            return;
        }
        self.specifications.materials.push(material.to_owned());
    }

    /// Remove a specification material by value.
    pub fn remove_material(&mut self, material: &str) {
        self.specifications.materials.retain(|m| m != material);
    }
}

/// A staged image upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// The full product record returned by `GET /admin/products/:id`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(rename = "_id")]
    pub id: AdminProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub features: Features,
    #[serde(default)]
    pub specifications: Specifications,
    #[serde(default)]
    pub pricing: PricingForm,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub sku: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub featured: bool,
}

const fn default_true() -> bool {
    true
}

/// Wrapper for the single-product endpoint response: `{"product": {...}}`.
#[derive(Debug, Clone, Deserialize)]
struct DetailResponse {
    product: ProductDetail,
}

impl From<ProductDetail> for ProductForm {
    fn from(detail: ProductDetail) -> Self {
        Self {
            name: detail.name,
            description: detail.description,
            price: detail.price,
            category: detail.category,
            size: detail.size.unwrap_or_default(),
            color: detail.color.unwrap_or_default(),
            quantity: detail.quantity,
            stock: detail.stock,
            features: detail.features,
            specifications: detail.specifications,
            pricing: detail.pricing,
            availability: detail.availability,
            tags: detail.tags,
            sku: detail.sku,
            is_active: detail.is_active,
            featured: detail.featured,
        }
    }
}

/// Generate a cosmetic SKU: category prefix, timestamp tail, random suffix.
///
/// Shape: `{first 3 uppercase letters of category}-{last 6 digits of epoch
/// millis}-{4 random uppercase alphanumerics}`. No uniqueness is enforced
/// client-side; the backend owns that.
#[must_use]
pub fn generate_sku(category: &str) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    let prefix: String = category.to_uppercase().chars().take(3).collect();

    let millis = chrono::Utc::now().timestamp_millis().to_string();
    let stamp: String = millis
        .chars()
        .skip(millis.len().saturating_sub(6))
        .collect();

    let mut rng = rand::rng();
    let suffix: String = (0..4)
        .map(|_| CHARSET.choose(&mut rng).copied().unwrap_or(b'A') as char)
        .collect();

    format!("{prefix}-{stamp}-{suffix}")
}

/// Submit-time validation shared by the add and edit controllers.
fn validate(form: &ProductForm, image_count: usize) -> Result<(), AdminError> {
    if form.name.trim().is_empty()
        || form.description.trim().is_empty()
        || form.price <= Decimal::ZERO
        || form.category.trim().is_empty()
    {
        return Err(AdminError::Validation(
            "Please fill in all required fields".to_owned(),
        ));
    }
    if image_count == 0 {
        return Err(AdminError::Validation(
            "Please upload at least one product image".to_owned(),
        ));
    }
    Ok(())
}

/// The edit payload: the form plus which existing images to retain.
fn edit_payload(
    form: &ProductForm,
    existing_images: &[String],
) -> Result<serde_json::Value, AdminError> {
    let mut payload = serde_json::to_value(form)?;
    if let Some(object) = payload.as_object_mut() {
        object.insert(
            "keepExistingImages".to_owned(),
            serde_json::Value::Bool(!existing_images.is_empty()),
        );
        object.insert(
            "existingImages".to_owned(),
            serde_json::to_value(existing_images)?,
        );
    }
    Ok(payload)
}

/// Assemble the multipart request: one `productData` JSON part, one
/// `images` part per staged file.
///
/// No Content-Type header is set on the request; the HTTP adapter leaves
/// the multipart boundary to reqwest.
fn multipart_form(
    payload: &serde_json::Value,
    images: &[ImageUpload],
) -> Result<reqwest::multipart::Form, AdminError> {
    let mut form = reqwest::multipart::Form::new().text("productData", payload.to_string());

    for image in images {
        let part = reqwest::multipart::Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .map_err(|e| AdminError::Validation(format!("Unsupported image type: {e}")))?;
        form = form.part("images", part);
    }

    Ok(form)
}

// =============================================================================
// Add
// =============================================================================

/// Controller for the add-product form.
pub struct AddProductController {
    api: ApiClient,
    form: ProductForm,
    images: Vec<ImageUpload>,
}

impl AddProductController {
    /// A blank form.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            form: ProductForm::default(),
            images: Vec::new(),
        }
    }

    /// The form state.
    #[must_use]
    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    /// Mutable access to the form state.
    pub fn form_mut(&mut self) -> &mut ProductForm {
        &mut self.form
    }

    /// The staged images, in upload order.
    #[must_use]
    pub fn images(&self) -> &[ImageUpload] {
        &self.images
    }

    /// Stage an image for upload.
    ///
    /// # Errors
    ///
    /// Returns a validation error beyond [`MAX_IMAGES`] staged images.
    pub fn stage_image(&mut self, image: ImageUpload) -> Result<(), AdminError> {
        if self.images.len() >= MAX_IMAGES {
            return Err(AdminError::Validation(
                format!("Maximum {MAX_IMAGES} images allowed"),
            ));
        }
        self.images.push(image);
        Ok(())
    }

    /// Unstage an image by position. Out-of-range indices are ignored.
    pub fn remove_image(&mut self, index: usize) {
        if index < self.images.len() {
            self.images.remove(index);
        }
    }

    /// Validate and create the product.
    ///
    /// A blank SKU is auto-generated first. Validation failure returns the
    /// user-facing message and performs no network call; the form is left
    /// as-is for correction.
    ///
    /// # Errors
    ///
    /// Returns a validation error or the normalized backend error.
    #[instrument(skip(self), fields(name = %self.form.name))]
    pub async fn submit(&mut self) -> Result<(), AdminError> {
        if self.form.sku.trim().is_empty() {
            self.form.sku = generate_sku(&self.form.category);
        }

        validate(&self.form, self.images.len())?;

        let payload = serde_json::to_value(&self.form)?;
        let form = multipart_form(&payload, &self.images)?;

        self.api
            .post_multipart::<serde_json::Value>("/admin/products", form)
            .await?;
        info!(sku = %self.form.sku, "Product created");
        Ok(())
    }
}

// =============================================================================
// Edit
// =============================================================================

#[derive(Clone, PartialEq)]
struct EditSnapshot {
    form: ProductForm,
    existing_images: Vec<String>,
}

/// Controller for the edit-product form.
///
/// Tracks a snapshot of the loaded record so "discard changes" and the
/// navigate-away prompt can compare against what the backend last said.
pub struct EditProductController {
    api: ApiClient,
    id: AdminProductId,
    form: ProductForm,
    existing_images: Vec<String>,
    new_images: Vec<ImageUpload>,
    snapshot: EditSnapshot,
}

impl EditProductController {
    /// Load the product and build the form.
    ///
    /// # Errors
    ///
    /// Returns the normalized backend error if the fetch fails.
    pub async fn load(api: ApiClient, id: &AdminProductId) -> Result<Self, AdminError> {
        let response: DetailResponse =
            api.get(&format!("/admin/products/{id}")).await?;
        Ok(Self::from_detail(api, response.product))
    }

    /// Build the controller from an already-fetched record.
    #[must_use]
    pub fn from_detail(api: ApiClient, detail: ProductDetail) -> Self {
        let id = detail.id.clone();
        let existing_images = detail.images.clone();
        let form = ProductForm::from(detail);
        let snapshot = EditSnapshot {
            form: form.clone(),
            existing_images: existing_images.clone(),
        };

        Self {
            api,
            id,
            form,
            existing_images,
            new_images: Vec::new(),
            snapshot,
        }
    }

    /// The product being edited.
    #[must_use]
    pub fn id(&self) -> &AdminProductId {
        &self.id
    }

    /// The form state.
    #[must_use]
    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    /// Mutable access to the form state.
    pub fn form_mut(&mut self) -> &mut ProductForm {
        &mut self.form
    }

    /// Images already on the backend that will be retained.
    #[must_use]
    pub fn existing_images(&self) -> &[String] {
        &self.existing_images
    }

    /// Newly staged images.
    #[must_use]
    pub fn new_images(&self) -> &[ImageUpload] {
        &self.new_images
    }

    /// Stage an additional image.
    ///
    /// # Errors
    ///
    /// Returns a validation error once retained plus staged images reach
    /// [`MAX_IMAGES`].
    pub fn stage_image(&mut self, image: ImageUpload) -> Result<(), AdminError> {
        if self.existing_images.len() + self.new_images.len() >= MAX_IMAGES {
            return Err(AdminError::Validation(
                format!("Maximum {MAX_IMAGES} images allowed"),
            ));
        }
        self.new_images.push(image);
        Ok(())
    }

    /// Drop a retained backend image by position.
    pub fn remove_existing_image(&mut self, index: usize) {
        if index < self.existing_images.len() {
            self.existing_images.remove(index);
        }
    }

    /// Unstage a new image by position.
    pub fn remove_new_image(&mut self, index: usize) {
        if index < self.new_images.len() {
            self.new_images.remove(index);
        }
    }

    /// Whether the form differs from the loaded record.
    ///
    /// Gates the navigate-away confirmation prompt, which is the rendering
    /// shell's responsibility.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.new_images.is_empty()
            || self.form != self.snapshot.form
            || self.existing_images != self.snapshot.existing_images
    }

    /// Throw away every edit and return to the loaded record.
    pub fn discard(&mut self) {
        self.form = self.snapshot.form.clone();
        self.existing_images = self.snapshot.existing_images.clone();
        self.new_images.clear();
    }

    /// Validate and save the product.
    ///
    /// At least one image must survive: a new upload or a retained existing
    /// one. On success the snapshot advances to the submitted state, so
    /// `has_changes()` reports clean.
    ///
    /// # Errors
    ///
    /// Returns a validation error or the normalized backend error.
    #[instrument(skip(self), fields(id = %self.id))]
    pub async fn submit(&mut self) -> Result<(), AdminError> {
        validate(
            &self.form,
            self.existing_images.len() + self.new_images.len(),
        )?;

        let payload = edit_payload(&self.form, &self.existing_images)?;
        let form = multipart_form(&payload, &self.new_images)?;

        self.api
            .put_multipart::<serde_json::Value>(&format!("/admin/products/{}", self.id), form)
            .await?;

        self.snapshot = EditSnapshot {
            form: self.form.clone(),
            existing_images: self.existing_images.clone(),
        };
        self.new_images.clear();
        info!("Product updated");
        Ok(())
    }
}
