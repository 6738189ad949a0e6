use crate::data::filters::{
    EnumFilter, InstantFilter, IntegerFilter, LongFilter, StringFilter, criteria,
};
use crate::data::types::{Gender, Pet};

pub type GenderFilter = EnumFilter<Gender>;

criteria! {
    /// Filters over pets
    pub struct PetCriteria for Pet {
        id: LongFilter => "id",
        owner_id: LongFilter => "ownerId",
        name: StringFilter => "name",
        species: StringFilter => "species",
        breed: StringFilter => "breed",
        age: IntegerFilter => "age",
        gender: GenderFilter => "gender",
        photo_url: StringFilter => "photoUrl",
        created_at: InstantFilter => "createdAt",
    }
}
